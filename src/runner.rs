use crate::delimiter::Delimiter;
use crate::dispatch::load_table;
use crate::engine::{ArrowEngine, ReadOptions, TabularEngine};
use crate::errors::CrossbowResult;
use crate::input::{Choice, LineSource};
#[cfg(feature = "cli")]
use crate::logging;
use crate::menu::Menu;
use crate::preview::{DEFAULT_PREVIEW_ROWS, Preview};
use crate::scan::scan_directory;
use crate::sheets::{SheetListing, resolve_sheets};

#[cfg(feature = "cli")]
use clap::Parser;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the input file (spreadsheet or CSV). Without it, files in the directory are listed
    /// for selection.
    #[clap(short, long, value_name = "path")]
    file: Option<String>,

    /// Sheet name, for spreadsheet files. Without it, the sheets are listed for selection.
    #[clap(short, long, value_name = "name")]
    sheet: Option<String>,

    /// Enable verbose logging
    #[clap(short, long)]
    verbose: bool,

    /// Directory to look for files in (current directory by default)
    #[clap(short = 'C', long, value_name = "path")]
    dir: Option<String>,

    /// Delimiter character for CSV files (comma by default)
    #[clap(short, long, value_name = "char")]
    delimiter: Option<String>,

    /// Use tab separation. Shortcut for -d '\t'.
    #[clap(short = 't', long)]
    tab_separated: bool,

    /// Do not interpret the first row as headers.
    #[clap(long)]
    no_headers: bool,

    /// Number of rows to show in the preview
    #[clap(short = 'n', long, value_name = "N", default_value_t = DEFAULT_PREVIEW_ROWS)]
    rows: usize,
}

#[cfg(feature = "cli")]
impl From<Args> for CrossbowOptions {
    fn from(args: Args) -> Self {
        Self {
            filename: args.file,
            sheet: args.sheet,
            verbose: args.verbose,
            dir: args.dir,
            delimiter: args.delimiter,
            tab_separated: args.tab_separated,
            no_headers: args.no_headers,
            rows: Some(args.rows),
        }
    }
}

// Struct for library usage without clap directives
#[derive(Debug, Default, Clone)]
pub struct CrossbowOptions {
    pub filename: Option<String>,
    pub sheet: Option<String>,
    pub verbose: bool,
    pub dir: Option<String>,
    pub delimiter: Option<String>,
    pub tab_separated: bool,
    pub no_headers: bool,
    pub rows: Option<usize>,
}

/// How a run ended when nothing went wrong
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A table was loaded and its preview printed
    Loaded(Preview),

    /// No file or sheet was selected, so there was nothing to load
    NothingSelected,
}

enum SheetStep {
    Use(Option<String>),
    Cancelled,
}

/// Interactive session over an engine, a source of answers and the terminal
pub struct Session<'a, E: ?Sized, L: ?Sized, W: ?Sized> {
    engine: &'a E,
    input: &'a mut L,
    output: &'a mut W,
}

impl<'a, E, L, W> Session<'a, E, L, W>
where
    E: TabularEngine + ?Sized,
    L: LineSource + ?Sized,
    W: Write + ?Sized,
{
    pub fn new(engine: &'a E, input: &'a mut L, output: &'a mut W) -> Self {
        Session {
            engine,
            input,
            output,
        }
    }

    /// Select a file and sheet, load it and print a preview.
    ///
    /// Selections that are cancelled, or a directory without candidates, end the run with
    /// [`Outcome::NothingSelected`]. Read failures are logged and returned as errors.
    pub fn run(&mut self, options: &CrossbowOptions) -> CrossbowResult<Outcome> {
        self.select_and_load(options).inspect_err(|e| {
            if e.is_usage_error() {
                error!("Invalid request: {}", e);
            } else {
                error!("Fatal error processing file: {}", e);
            }
        })
    }

    fn select_and_load(&mut self, options: &CrossbowOptions) -> CrossbowResult<Outcome> {
        let read_options = ReadOptions {
            delimiter: Delimiter::from_arg(&options.delimiter, options.tab_separated)?,
            has_headers: !options.no_headers,
        };

        let Some(path) = self.select_file(options)? else {
            info!("No file selected. Exiting.");
            return Ok(Outcome::NothingSelected);
        };

        let sheet = match self.select_sheet(&path, options)? {
            SheetStep::Use(sheet) => sheet,
            SheetStep::Cancelled => {
                info!("No sheet selected. Exiting.");
                return Ok(Outcome::NothingSelected);
            }
        };

        let table = load_table(self.engine, &path, sheet.as_deref(), &read_options)?;

        let max_rows = options.rows.unwrap_or(DEFAULT_PREVIEW_ROWS);
        let preview = Preview::from_table(&table, max_rows)?;
        writeln!(self.output, "{preview}")?;
        self.output.flush()?;
        info!(
            "Successfully loaded {} rows x {} columns from {}",
            table.num_rows(),
            table.num_columns(),
            path.display()
        );
        Ok(Outcome::Loaded(preview))
    }

    fn select_file(&mut self, options: &CrossbowOptions) -> CrossbowResult<Option<PathBuf>> {
        if let Some(filename) = &options.filename {
            debug!("Using file from the command line: {}", filename);
            return Ok(Some(PathBuf::from(filename)));
        }

        let dir = options.dir.as_deref().unwrap_or(".");
        let candidates = scan_directory(dir);
        if candidates.is_empty() {
            warn!("No spreadsheet or CSV files found in {}", display_dir(dir));
            return Ok(None);
        }

        let menu = Menu::new("Found files", "Enter file number");
        match menu.choose(&candidates, &mut *self.input, &mut *self.output)? {
            Choice::Selected(candidate) => {
                info!("Selected file: {}", candidate.name);
                Ok(Some(candidate.path.clone()))
            }
            Choice::Cancelled => {
                info!("File selection cancelled.");
                Ok(None)
            }
        }
    }

    fn select_sheet(&mut self, path: &Path, options: &CrossbowOptions) -> CrossbowResult<SheetStep> {
        if let Some(sheet) = &options.sheet {
            return Ok(SheetStep::Use(Some(sheet.clone())));
        }

        let sheets = match resolve_sheets(self.engine, path) {
            SheetListing::NotApplicable => return Ok(SheetStep::Use(None)),
            SheetListing::Sheets(sheets) => sheets,
        };

        match sheets.as_slice() {
            // Unreadable workbook; the load reports why
            [] => Ok(SheetStep::Use(None)),
            [only] => {
                info!("Using the only sheet: {}", only);
                Ok(SheetStep::Use(Some(only.clone())))
            }
            _ => {
                let menu = Menu::new("Available sheets", "Enter sheet number");
                match menu.choose(&sheets, &mut *self.input, &mut *self.output)? {
                    Choice::Selected(sheet) => {
                        info!("Selected sheet: {}", sheet);
                        Ok(SheetStep::Use(Some(sheet.clone())))
                    }
                    Choice::Cancelled => {
                        info!("Sheet selection cancelled.");
                        Ok(SheetStep::Cancelled)
                    }
                }
            }
        }
    }
}

fn display_dir(dir: &str) -> String {
    if dir == "." {
        "the current directory".to_owned()
    } else {
        dir.to_owned()
    }
}

/// Run crossbow with options provided in a `CrossbowOptions` struct, reading answers from
/// `input` and printing menus and the preview to `output`.
///
/// Errors are logged before being returned.
///
/// Example:
///
/// ```no_run
/// use crossbow::{run_crossbow_with_options, CrossbowOptions, Outcome};
///
/// let options = CrossbowOptions {
///     filename: Some("/path/to/your.xlsx".to_string()),
///     sheet: Some("Sheet1".to_string()),
///     ..Default::default()
/// };
/// let mut input = std::io::stdin().lock();
/// let mut output = std::io::stdout();
/// match run_crossbow_with_options(options, &mut input, &mut output) {
///     Ok(Outcome::Loaded(preview)) => println!("{} rows", preview.total_rows),
///     Ok(Outcome::NothingSelected) => {},
///     Err(e) => eprintln!("Error: {:?}", e),
/// }
/// ```
pub fn run_crossbow_with_options<L, W>(
    options: CrossbowOptions,
    input: &mut L,
    output: &mut W,
) -> CrossbowResult<Outcome>
where
    L: LineSource + ?Sized,
    W: Write + ?Sized,
{
    Session::new(&ArrowEngine, input, output).run(&options)
}

#[cfg(feature = "cli")]
fn run_on_terminal(options: CrossbowOptions) -> CrossbowResult<Outcome> {
    let mut input = std::io::stdin().lock();
    let mut output = std::io::stdout().lock();
    run_crossbow_with_options(options, &mut input, &mut output)
}

/// Run crossbow with a list of arguments. The accepted arguments are the same as the command line
/// arguments for the crossbow binary. Logging is set up for the duration of the run.
///
/// Example:
///
/// ```no_run
/// use crossbow::run_crossbow;
///
/// match run_crossbow(&["--file", "report.ods", "--sheet", "Summary"]) {
///     Ok(_) => {},
///     Err(e) => eprintln!("Error: {:?}", e),
/// }
/// ```
#[cfg(feature = "cli")]
pub fn run_crossbow<I, T>(args: I) -> CrossbowResult<Outcome>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut args_items = vec![OsString::from("crossbow")];
    for item in args {
        args_items.push(item.into());
    }
    let args = Args::parse_from(args_items);
    let options: CrossbowOptions = args.into();

    let dispatch = logging::dispatch(options.verbose);
    tracing::dispatcher::with_default(&dispatch, || run_on_terminal(options))
}

#[cfg(not(feature = "cli"))]
pub fn run_crossbow<I, T>(_args: I) -> CrossbowResult<Outcome>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    eprintln!("Error: CLI is not enabled. Compile with the 'cli' feature to use this binary.");
    std::process::exit(1);
}
