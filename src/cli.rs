use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::Parser;

/// Command-line options, parsed once at startup and passed down explicitly.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "csvsift",
    version,
    about = "Filter and sort a CSV table by named columns"
)]
pub struct Options {
    /// CSV file path (optional, otherwise first positional argument or stdin)
    #[arg(long = "file", value_name = "PATH", allow_hyphen_values = true)]
    pub file: Option<PathBuf>,

    /// Column name for filtering
    #[arg(long = "filter", value_name = "COLUMN", allow_hyphen_values = true)]
    pub filter: Option<String>,

    /// Substring to match for filtering
    #[arg(long = "value", value_name = "SUBSTRING", allow_hyphen_values = true)]
    pub value: Option<String>,

    /// Column name for sorting
    #[arg(long = "sort", value_name = "COLUMN", allow_hyphen_values = true)]
    pub sort: Option<String>,

    /// Sort direction: asc/desc or lt/le/gt/ge, optionally :num or :str (e.g. asc:num)
    #[arg(
        long = "type",
        value_name = "DESCRIPTOR",
        default_value = "asc",
        allow_hyphen_values = true
    )]
    pub sort_type: String,

    /// Input file, used when -file is not given
    #[arg(value_name = "FILE")]
    pub positional: Vec<PathBuf>,
}

impl Options {
    /// Parse process arguments, accepting `-flag` as well as `--flag`.
    pub fn from_env() -> Self {
        Options::parse_from(normalize_args(std::env::args_os()))
    }

    /// Parse an explicit argument list (first item is the program name).
    pub fn try_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Options::try_parse_from(normalize_args(args))
    }

    /// `-file`, else the first positional argument, else `None` (stdin).
    pub fn input_path(&self) -> Option<&Path> {
        non_empty_path(self.file.as_deref())
            .or_else(|| non_empty_path(self.positional.first().map(PathBuf::as_path)))
    }

    /// Filter column and value, when either was given. Empty strings count as absent.
    pub fn filter_request(&self) -> Option<(&str, &str)> {
        let column = non_empty(self.filter.as_deref());
        let value = non_empty(self.value.as_deref());
        if column.is_none() && value.is_none() {
            return None;
        }
        Some((column.unwrap_or(""), value.unwrap_or("")))
    }

    pub fn sort_column(&self) -> Option<&str> {
        non_empty(self.sort.as_deref())
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

fn non_empty_path(p: Option<&Path>) -> Option<&Path> {
    p.filter(|p| !p.as_os_str().is_empty())
}

const VALUE_FLAGS: [&str; 5] = ["--file", "--filter", "--value", "--sort", "--type"];

/// Rewrite single-dash long flags (`-file`, `-type=desc`) to `--file` form.
///
/// Short flags (`-h`, `-V`), flag values (`-value -x`), everything after
/// `--`, and a lone `-` pass through.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out: Vec<OsString> = Vec::new();
    let mut passthrough = false;
    for (i, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        let expects_value = out
            .last()
            .and_then(|prev| prev.to_str())
            .is_some_and(|prev| VALUE_FLAGS.contains(&prev));
        if i == 0 || passthrough || expects_value {
            out.push(arg);
            continue;
        }
        match arg.to_str() {
            Some("--") => {
                passthrough = true;
                out.push(arg);
            }
            Some(s) if s.len() > 2 && s.starts_with('-') && !s.starts_with("--") => {
                out.push(format!("-{s}").into());
            }
            _ => out.push(arg),
        }
    }
    out
}
