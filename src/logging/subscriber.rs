//! Rendering of logger events: the coloured console format, the plain
//! log file, and global subscriber setup.
use std::fmt::Write as _;
use std::fs;
use std::io::Write as _;
use std::sync::Mutex;

use tracing::Level;

use super::paths::log_file_path;

/// Target of section headers.
pub(super) const STAGE: &str = "brewsync::stage";
/// Target of actions held back by `--dry-run`.
pub(super) const DRY_RUN: &str = "brewsync::dry_run";
/// Target of per-entry reconcile events (`category`, `name`, `state`,
/// `detail` fields).
pub(super) const ENTRY: &str = "brewsync::entry";
/// Target of summary task lines (`icon`, `status` fields).
pub(super) const SUMMARY: &str = "brewsync::summary";

/// The fields of one event, flattened to strings.
#[derive(Default)]
struct Fields {
    message: String,
    named: Vec<(&'static str, String)>,
}

impl Fields {
    fn of(event: &tracing::Event<'_>) -> Self {
        let mut fields = Self::default();
        event.record(&mut fields);
        fields
    }

    fn get(&self, key: &str) -> &str {
        self.named
            .iter()
            .find(|(name, _)| *name == key)
            .map_or("", |(_, value)| value.as_str())
    }

    /// Event text without level tag or colour.
    ///
    /// Entry events become `category: name=… state=… detail`, dropping the
    /// name when the record has none.
    fn text(&self, target: &str) -> String {
        if target != ENTRY {
            return self.message.clone();
        }
        let mut line = format!("{}:", self.get("category"));
        let name = self.get("name");
        if !name.is_empty() {
            let _ = write!(line, " name={name}");
        }
        let _ = write!(line, " state={}", self.get("state"));
        let detail = self.get("detail");
        if !detail.is_empty() {
            let _ = write!(line, " {detail}");
        }
        line
    }
}

impl tracing::field::Visit for Fields {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.store(field, value.to_string());
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.store(field, format!("{value:?}"));
    }
}

impl Fields {
    fn store(&mut self, field: &tracing::field::Field, value: String) {
        if field.name() == "message" {
            self.message = value;
        } else {
            self.named.push((field.name(), value));
        }
    }
}

/// How an event is presented, decided once for both outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Stage,
    Error,
    Warn,
    DryRun,
    Summary,
    Info,
    Debug,
}

impl Kind {
    fn of(level: Level, target: &str, fields: &Fields) -> Self {
        match level {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO => match target {
                STAGE => Self::Stage,
                DRY_RUN => Self::DryRun,
                ENTRY if fields.get("state") == "would-install" => Self::DryRun,
                SUMMARY => Self::Summary,
                _ => Self::Info,
            },
            _ => Self::Debug,
        }
    }

    /// Bracketed tag written before the text in the log file.
    const fn file_tag(self) -> Option<&'static str> {
        match self {
            Self::Error => Some("[error]"),
            Self::Warn => Some("[warn]"),
            Self::DryRun => Some("[dry run]"),
            Self::Debug => Some("[debug]"),
            Self::Stage | Self::Summary | Self::Info => None,
        }
    }
}

/// ANSI colour for a summary line, keyed by its `status` field.
fn status_colour(status: &str) -> &'static str {
    match status {
        "ok" => "\x1b[32m",
        "n/a" => "\x1b[2m",
        "skipped" => "\x1b[33m",
        "failed" => "\x1b[31m",
        _ => "\x1b[37m",
    }
}

/// Appends every event to the command's log file, timestamped and without
/// colour. Receives `DEBUG` and above whatever the console level is.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Truncate the log file for `command` and write the run header.
    ///
    /// Returns `None` when there is no writable cache directory.
    pub(super) fn new(command: &str) -> Option<Self> {
        let path = log_file_path(command)?;
        let mut file = fs::File::create(&path).ok()?;
        writeln!(
            file,
            "# brewsync {} {command} started {}",
            crate::commands::version(),
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        )
        .ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        let fields = Fields::of(event);
        let kind = Kind::of(*metadata.level(), metadata.target(), &fields);
        let text = fields.text(metadata.target());
        let ts = chrono::Utc::now().format("%H:%M:%S");

        let line = match (kind, kind.file_tag()) {
            (Kind::Stage, _) => format!("[{ts}] ==> {text}"),
            (Kind::Summary, _) => format!("[{ts}]     {} {text}", fields.get("icon")),
            (_, Some(tag)) => format!("[{ts}]     {tag} {text}"),
            (_, None) => format!("[{ts}]     {text}"),
        };

        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{line}");
        }
    }
}

/// Console output: stage arrows, indented progress, coloured level tags.
struct ConsoleFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let fields = Fields::of(event);
        let text = fields.text(metadata.target());

        match Kind::of(*metadata.level(), metadata.target(), &fields) {
            Kind::Stage => writeln!(writer, "\x1b[1;34m==>\x1b[0m \x1b[1m{text}\x1b[0m"),
            Kind::Error => writeln!(writer, "\x1b[31mERROR\x1b[0m {text}"),
            Kind::Warn => writeln!(writer, "\x1b[33mWARN\x1b[0m  {text}"),
            Kind::DryRun => writeln!(writer, "  \x1b[33m[DRY RUN]\x1b[0m {text}"),
            Kind::Summary => writeln!(
                writer,
                "  {}{} {text}\x1b[0m",
                status_colour(fields.get("status")),
                fields.get("icon")
            ),
            Kind::Info => writeln!(writer, "  {text}"),
            Kind::Debug => writeln!(writer, "  \x1b[2m{text}\x1b[0m"),
        }
    }
}

/// Install the global subscriber: console at `INFO` (`DEBUG` with
/// `verbose`, warnings and errors on stderr) plus the log file for
/// `command`. Call once, before the first log line.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let make_writer = std::io::stderr
        .with_max_level(Level::WARN)
        .and(std::io::stdout.with_min_level(Level::INFO));

    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter)
        .with_writer(make_writer)
        .with_filter(console_level);

    let file_layer = FileLayer::new(command).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn fields(named: &[(&'static str, &str)]) -> Fields {
        Fields {
            message: String::new(),
            named: named.iter().map(|(k, v)| (*k, (*v).to_string())).collect(),
        }
    }

    #[test]
    fn entry_text_uses_key_value_form() {
        let installed = fields(&[
            ("category", "formula"),
            ("name", "wget"),
            ("state", "installed"),
            ("detail", ""),
        ]);
        assert_eq!(installed.text(ENTRY), "formula: name=wget state=installed");

        let nameless = fields(&[
            ("category", "pip"),
            ("name", ""),
            ("state", "name-error"),
            ("detail", "{homebrew_pip: ~}"),
        ]);
        assert_eq!(nameless.text(ENTRY), "pip: state=name-error {homebrew_pip: ~}");
    }

    #[test]
    fn would_install_entries_render_as_dry_run() {
        let pending = fields(&[("state", "would-install")]);
        assert_eq!(Kind::of(Level::INFO, ENTRY, &pending), Kind::DryRun);
        let installed = fields(&[("state", "installed")]);
        assert_eq!(Kind::of(Level::INFO, ENTRY, &installed), Kind::Info);
    }

    #[test]
    fn level_outranks_target() {
        let none = fields(&[]);
        assert_eq!(Kind::of(Level::ERROR, ENTRY, &none), Kind::Error);
        assert_eq!(Kind::of(Level::DEBUG, STAGE, &none), Kind::Debug);
        assert_eq!(Kind::of(Level::INFO, SUMMARY, &none), Kind::Summary);
    }
}
