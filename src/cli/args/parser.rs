//! Module defining the command line argument parser.

use std::convert::TryFrom;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::str::FromStr;

use clap::{self, Arg, ArgAction, ArgMatches};
use memeforge::{Color, HorizontalAnchor, RenderRequest, DEFAULT_OUTPUT_DIRECTORY};
use serde_json;

use crate::{NAME, VERSION};
use super::model::{ArgsError, Command, Options};


impl TryFrom<ArgMatches> for Options {
    type Error = ArgsError;

    fn try_from(matches: ArgMatches) -> Result<Self, Self::Error> {
        let verbose_count = matches.get_count(OPT_VERBOSE) as isize;
        let quiet_count = matches.get_count(OPT_QUIET) as isize;
        let verbosity = verbose_count - quiet_count;

        let command = if matches.get_flag(OPT_LIST) {
            Command::List
        } else {
            let mut request = match matches.get_one::<String>(OPT_JSON) {
                Some(source) => read_request(source.trim())?,
                None => RenderRequest{
                    template_id: value(&matches, ARG_TEMPLATE).unwrap_or_default(),
                    caption: value(&matches, ARG_CAPTION),
                    ..RenderRequest::default()
                },
            };
            // Command line flags take precedence over the JSON.
            macro_rules! override_field {
                ($field:ident, $opt:expr, $ty:ty) => (
                    if let Some(v) = matches.get_one::<$ty>($opt) {
                        request.$field = Some(v.clone());
                    }
                );
            }
            override_field!(font, OPT_FONT, String);
            override_field!(max_font_size, OPT_SIZE, u32);
            override_field!(color, OPT_COLOR, Color);
            override_field!(outline_color, OPT_OUTLINE, Color);
            override_field!(stroke_width, OPT_STROKE, u32);
            override_field!(filename, OPT_FILENAME, String);
            Command::Render(request)
        };

        let path = |opt| matches.get_one::<PathBuf>(opt).cloned().unwrap_or_default();
        Ok(Options{
            verbosity,
            command,
            registry: path(OPT_REGISTRY),
            images: path(OPT_IMAGES),
            fonts: path(OPT_FONTS),
            output: path(OPT_OUTPUT),
            strict_fonts: !matches.get_flag(OPT_ALLOW_FALLBACK_FONT),
            system_fonts: !matches.get_flag(OPT_NO_SYSTEM_FONTS),
            anchor: matches.get_one::<HorizontalAnchor>(OPT_ANCHOR).copied().unwrap_or_default(),
        })
    }
}

fn value(matches: &ArgMatches, id: &str) -> Option<String> {
    matches.get_one::<String>(id).map(|s| s.trim().to_owned())
}

/// Read the render request JSON from a file, or standard input for `-`.
fn read_request(source: &str) -> Result<RenderRequest, ArgsError> {
    let request = if source == "-" {
        serde_json::from_reader(io::stdin().lock())?
    } else {
        let file = File::open(source)?;
        serde_json::from_reader(BufReader::new(file))?
    };
    Ok(request)
}


// Parser definition

/// Type of the argument parser object.
pub type Parser = clap::Command;


lazy_static! {
    static ref ABOUT: &'static str = option_env!("CARGO_PKG_DESCRIPTION").unwrap_or("");
}

const ARG_TEMPLATE: &str = "template";
const ARG_CAPTION: &str = "caption";
const OPT_JSON: &str = "json";
const OPT_LIST: &str = "list";
const OPT_REGISTRY: &str = "registry";
const OPT_IMAGES: &str = "images";
const OPT_FONTS: &str = "fonts";
const OPT_OUTPUT: &str = "output";
const OPT_FONT: &str = "font";
const OPT_SIZE: &str = "size";
const OPT_COLOR: &str = "color";
const OPT_OUTLINE: &str = "outline";
const OPT_STROKE: &str = "stroke";
const OPT_FILENAME: &str = "filename";
const OPT_ANCHOR: &str = "anchor";
const OPT_ALLOW_FALLBACK_FONT: &str = "allow-fallback-font";
const OPT_NO_SYSTEM_FONTS: &str = "no-system-fonts";
const OPT_VERBOSE: &str = "verbose";
const OPT_QUIET: &str = "quiet";


/// Create the parser for application's command line.
pub fn create_parser() -> Parser {
    let mut parser = Parser::new(*NAME);
    if let Some(version) = *VERSION {
        parser = parser.version(version);
    }
    parser
        .about(*ABOUT)
        .author(clap::crate_authors!(", "))

        // What to render.
        .arg(Arg::new(ARG_TEMPLATE)
            .value_name("TEMPLATE")
            .required_unless_present_any([OPT_JSON, OPT_LIST])
            .help("ID of the meme template to caption"))
        .arg(Arg::new(ARG_CAPTION)
            .value_name("CAPTION")
            .requires(ARG_TEMPLATE)
            .required_unless_present_any([OPT_JSON, OPT_LIST])
            .help("Caption text")
            .long_help(concat!(
                "Text of the caption.\n\n",
                "Texts for different boxes of the template are separated with `||`, ",
                "e.g. \"top text || bottom text\".")))
        .arg(Arg::new(OPT_JSON)
            .long("json")
            .value_name("FILE")
            .conflicts_with_all([ARG_TEMPLATE, ARG_CAPTION])
            .help("Read the render request as JSON from a file (or `-` for stdin)"))
        .arg(Arg::new(OPT_LIST)
            .long("list").short('l')
            .action(ArgAction::SetTrue)
            .conflicts_with_all([ARG_TEMPLATE, ARG_CAPTION, OPT_JSON])
            .help("List the templates in the registry and exit"))

        // Resources.
        .arg(Arg::new(OPT_REGISTRY)
            .long("registry").short('r')
            .value_name("FILE")
            .value_parser(clap::value_parser!(PathBuf))
            .default_value("memes.json")
            .help("JSON file with the registry of templates"))
        .arg(Arg::new(OPT_IMAGES)
            .long("images").short('i')
            .value_name("DIR")
            .value_parser(clap::value_parser!(PathBuf))
            .default_value(".")
            .help("Directory that template image paths are relative to"))
        .arg(Arg::new(OPT_FONTS)
            .long("fonts").short('f')
            .value_name("DIR")
            .value_parser(clap::value_parser!(PathBuf))
            .default_value("fonts")
            .help("Directory to look for fonts in"))
        .arg(Arg::new(OPT_OUTPUT)
            .long("output").short('o')
            .value_name("DIR")
            .value_parser(clap::value_parser!(PathBuf))
            .default_value(DEFAULT_OUTPUT_DIRECTORY)
            .help("Directory to write the rendered memes to"))
        .arg(Arg::new(OPT_ALLOW_FALLBACK_FONT)
            .long("allow-fallback-font")
            .action(ArgAction::SetTrue)
            .help("Render with a built-in font if no font file can be found"))
        .arg(Arg::new(OPT_NO_SYSTEM_FONTS)
            .long("no-system-fonts")
            .action(ArgAction::SetTrue)
            .help("Don't look for fonts installed in the system"))

        // Styling.
        .arg(Arg::new(OPT_FONT)
            .long("font")
            .value_name("NAME")
            .help("Font to render the text with"))
        .arg(Arg::new(OPT_SIZE)
            .long("size")
            .value_name("PIXELS")
            .value_parser(clap::value_parser!(u32))
            .help("Font size"))
        .arg(Arg::new(OPT_COLOR)
            .long("color")
            .value_name("COLOR")
            .value_parser(Color::from_str)
            .help("Text color (any CSS color)"))
        .arg(Arg::new(OPT_OUTLINE)
            .long("outline")
            .value_name("COLOR")
            .value_parser(Color::from_str)
            .help("Color of the text outline (any CSS color)"))
        .arg(Arg::new(OPT_STROKE)
            .long("stroke")
            .value_name("PIXELS")
            .value_parser(clap::value_parser!(u32))
            .help("Width of the text outline (0 disables it)"))
        .arg(Arg::new(OPT_ANCHOR)
            .long("anchor")
            .value_name("ANCHOR")
            .value_parser(HorizontalAnchor::from_str)
            .help("Point of the box to center text around: `center` or `origin`"))
        .arg(Arg::new(OPT_FILENAME)
            .long("filename")
            .value_name("NAME")
            .help("Name of the output file (generated if omitted)"))

        // Verbosity flags.
        .arg(Arg::new(OPT_VERBOSE)
            .long("verbose").short('v')
            .action(ArgAction::Count)
            .conflicts_with(OPT_QUIET)
            .help("Increase logging verbosity"))
        .arg(Arg::new(OPT_QUIET)
            .long("quiet").short('q')
            .action(ArgAction::Count)
            .conflicts_with(OPT_VERBOSE)
            .help("Decrease logging verbosity"))
}
