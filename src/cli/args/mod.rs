//! Module for handling command line arguments.

mod model;
mod parser;


use std::convert::TryFrom;
use std::env;
use std::ffi::OsString;

pub use self::model::{ArgsError, Command, Options};
use self::parser::create_parser;


/// Parse command line arguments and return `Options` object.
#[inline]
pub fn parse() -> Result<Options, ArgsError> {
    parse_from_argv(env::args_os())
}

/// Parse application options from given array of arguments
/// (*all* arguments, including binary name).
#[inline]
pub fn parse_from_argv<I, T>(argv: I) -> Result<Options, ArgsError>
    where I: IntoIterator<Item=T>, T: Clone + Into<OsString>
{
    let parser = create_parser();
    let matches = parser.try_get_matches_from(argv)?;
    Options::try_from(matches)
}


#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use memeforge::{Color, HorizontalAnchor};
    use speculoos::prelude::*;
    use super::{parse_from_argv, ArgsError, Command};
    use crate::NAME;

    #[test]
    fn no_args() {
        assert_that!(parse_from_argv(Vec::<&str>::new())).is_err();
        assert_that!(parse_from_argv(vec![*NAME])).is_err();
    }

    #[test]
    fn template_and_caption() {
        let opts = parse_from_argv(vec![*NAME, "181913649", "top || bottom"]).unwrap();
        match opts.command {
            Command::Render(ref request) => {
                assert_eq!("181913649", request.template_id);
                assert_eq!(Some("top || bottom".into()), request.caption);
                assert!(request.font.is_none());
                assert!(request.filename.is_none());
            }
            ref other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(0, opts.verbosity);
        assert!(opts.strict_fonts);
        assert!(opts.system_fonts);
    }

    #[test]
    fn template_without_caption() {
        assert_that!(parse_from_argv(vec![*NAME, "181913649"])).is_err();
    }

    #[test]
    fn default_paths() {
        let opts = parse_from_argv(vec![*NAME, "drake", "a || b"]).unwrap();
        assert_eq!(PathBuf::from("memes.json"), opts.registry);
        assert_eq!(PathBuf::from("."), opts.images);
        assert_eq!(PathBuf::from("fonts"), opts.fonts);
        assert_eq!(PathBuf::from("generated_memes"), opts.output);
        assert_eq!(HorizontalAnchor::Center, opts.anchor);
    }

    #[test]
    fn custom_paths() {
        let opts = parse_from_argv(vec![
            *NAME, "-r", "data/memes.json", "--images", "data/img",
            "-f", "/usr/share/fonts/truetype", "--output", "/tmp/memes",
            "drake", "a || b",
        ]).unwrap();
        assert_eq!(PathBuf::from("data/memes.json"), opts.registry);
        assert_eq!(PathBuf::from("data/img"), opts.images);
        assert_eq!(PathBuf::from("/usr/share/fonts/truetype"), opts.fonts);
        assert_eq!(PathBuf::from("/tmp/memes"), opts.output);
    }

    #[test]
    fn style_options() {
        let opts = parse_from_argv(vec![
            *NAME, "--font", "arial", "--size", "32", "--color", "yellow",
            "--outline", "#102030", "--stroke", "0", "--filename", "out.jpg",
            "--anchor", "origin", "--allow-fallback-font", "--no-system-fonts",
            "drake", "a || b",
        ]).unwrap();
        let request = match opts.command {
            Command::Render(request) => request,
            other => panic!("unexpected command: {:?}", other),
        };
        assert_eq!(Some("arial".into()), request.font);
        assert_eq!(Some(32), request.max_font_size);
        assert_eq!(Some(Color(255, 255, 0)), request.color);
        assert_eq!(Some(Color(0x10, 0x20, 0x30)), request.outline_color);
        assert_eq!(Some(0), request.stroke_width);
        assert_eq!(Some("out.jpg".into()), request.filename);
        assert_eq!(HorizontalAnchor::Origin, opts.anchor);
        assert!(!opts.strict_fonts);
        assert!(!opts.system_fonts);
    }

    #[test]
    fn invalid_values() {
        assert_that!(parse_from_argv(vec![*NAME, "--size", "big", "drake", "a"])).is_err();
        assert_that!(parse_from_argv(vec![*NAME, "--color", "#nope", "drake", "a"])).is_err();
        assert_that!(parse_from_argv(vec![*NAME, "--anchor", "left", "drake", "a"])).is_err();
    }

    #[test]
    fn list() {
        let opts = parse_from_argv(vec![*NAME, "--list"]).unwrap();
        assert_eq!(Command::List, opts.command);
        assert_that!(parse_from_argv(vec![*NAME, "-l", "drake", "a || b"])).is_err();
    }

    #[test]
    fn json_missing_file() {
        match parse_from_argv(vec![*NAME, "--json", "/surely/this/does/not/exist.json"]) {
            Err(ArgsError::Io(_)) => {},
            other => panic!("unexpected result: {:?}", other),
        }
        assert_that!(parse_from_argv(vec![*NAME, "--json", "-", "drake"])).is_err();
    }

    #[test]
    fn verbosity() {
        let opts = parse_from_argv(vec![*NAME, "-vv", "drake", "a || b"]).unwrap();
        assert_eq!(2, opts.verbosity);
        let opts = parse_from_argv(vec![*NAME, "-q", "drake", "a || b"]).unwrap();
        assert_eq!(-1, opts.verbosity);
        assert_that!(parse_from_argv(vec![*NAME, "-v", "-q", "drake", "a"])).is_err();
    }
}
