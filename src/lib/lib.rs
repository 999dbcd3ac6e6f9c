//!
//! memeforge  -- Captions on demand
//!

             extern crate css_color_parser;
             extern crate glob;
             extern crate image;
             extern crate itertools;
#[macro_use] extern crate lazy_static;
#[macro_use] extern crate log;
#[macro_use] extern crate maplit;
             extern crate mime;
             extern crate rand;
             extern crate regex;
             extern crate reqwest;
             extern crate rusttype;
             extern crate serde;
#[macro_use] extern crate serde_derive;
             extern crate serde_json;
             extern crate tempfile;
             extern crate thiserror;
             extern crate unicode_normalization;


#[cfg(test)]              extern crate serde_test;
#[cfg(test)] #[macro_use] extern crate speculoos;


mod caption;
mod model;
mod resources;
mod text;


pub use crate::caption::*;
pub use crate::model::*;
pub use crate::resources::*;
pub use crate::text::{render_box, wrap, BoxOutcome, StrokeOutcome, TextMetrics, TextStyle};
