//! Build regular expressions out of small pieces that can be checked on their own.
//!
//! ```
//! use rexp::{any_of, digit, re};
//!
//! let delim = any_of(&["- /."]).unwrap();
//! let year = ((re("19") | re("20")) + digit().repeat(2).unwrap()).capture("year");
//! let month = ((re("0") + any_of(&["1-9"]).unwrap()) | (re("1") + any_of(&["012"]).unwrap()))
//!     .capture("month");
//! let date = (year + &delim + month).all();
//!
//! let m = date.find("2009-01").unwrap().unwrap();
//! assert_eq!(m.get("year"), Some("2009"));
//! assert_eq!(m.get("month"), Some("01"));
//! ```

mod error;
mod expr;
mod match_result;
mod names;

pub mod constants;

pub use constants::{
    any, any_of, digit, digits, hex_digit, hex_digits, none_of, nonspace, nonspaces, null, space,
    spaces, word, word_break, word_char,
};
pub use error::Error;
pub use expr::{MAX_REPEAT, Modes, Precedence, Rexp, re};
pub use match_result::{Iter, Match};
pub use names::NameMap;
