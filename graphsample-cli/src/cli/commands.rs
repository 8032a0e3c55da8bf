use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use graphsample_core::{Graph, SamplerBuilder, SamplingError, StrategyKind};
use graphsample_providers_text::{TextFormat, TextProviderError, write_edge_list};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "graphsample", about = "Sample representative subgraphs.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Reduce a graph file with one sampling strategy.
    Sample(SampleCommand),
}

/// Options accepted by the `sample` command.
#[derive(Debug, Args, Clone)]
pub struct SampleCommand {
    /// Path to the graph file.
    pub path: PathBuf,

    /// Layout of the graph file.
    #[arg(long, value_enum, default_value_t = InputFormat::EdgeList)]
    pub format: InputFormat,

    /// Strategy tag, either `<policy>` or `<family>:<policy>`.
    #[arg(long, default_value = "random-node")]
    pub strategy: String,

    /// Fraction of nodes to keep, in (0, 1].
    #[arg(long)]
    pub ratio: f64,

    /// Seed for reproducible runs; omitted means a fresh seed per run.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the sampled graph to this path as an edge list.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Optional tuning parameters.
    #[command(flatten)]
    pub tuning: TuningArgs,
}

/// Overrides for the sampler's tuning parameters.
#[derive(Debug, Args, Clone, Default)]
pub struct TuningArgs {
    /// Fraction of the input removed per deletion round, in (0, 1].
    #[arg(long)]
    pub batch_fraction: Option<f64>,

    /// Probability that a walk escapes on each step, in [0, 1].
    #[arg(long)]
    pub escape_probability: Option<f64>,

    /// Probability that the hybrid policy picks a node-edge step, in [0, 1].
    #[arg(long)]
    pub hybrid_weight: Option<f64>,

    /// Fruitless steps tolerated before a run is abandoned.
    #[arg(long)]
    pub max_stalled_steps: Option<NonZeroUsize>,
}

impl TuningArgs {
    fn apply(self, mut builder: SamplerBuilder) -> SamplerBuilder {
        if let Some(fraction) = self.batch_fraction {
            builder = builder.with_batch_fraction(fraction);
        }
        if let Some(probability) = self.escape_probability {
            builder = builder.with_escape_probability(probability);
        }
        if let Some(weight) = self.hybrid_weight {
            builder = builder.with_hybrid_weight(weight);
        }
        if let Some(steps) = self.max_stalled_steps {
            builder = builder.with_max_stalled_steps(steps);
        }
        builder
    }
}

/// Supported graph file layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// One `a,b` edge per line.
    EdgeList,
    /// Line `i` lists the neighbours of node `i`.
    AdjacencyList,
}

impl From<InputFormat> for TextFormat {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::EdgeList => Self::EdgeList,
            InputFormat::AdjacencyList => Self::AdjacencyList,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Opening or creating a file failed.
    #[error("failed to access `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Reading or writing the text graph failed.
    #[error(transparent)]
    Text(#[from] TextProviderError),
    /// Sampling failed.
    #[error(transparent)]
    Core(#[from] SamplingError),
}

impl CliError {
    /// Returns the stable code of the underlying library error, if any.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Io { .. } => None,
            Self::Text(error) => Some(error.code().as_str()),
            Self::Core(error) => Some(error.code().as_str()),
        }
    }
}

/// Summarises the outcome of a `sample` command.
#[derive(Debug, Clone)]
pub struct SampleSummary {
    /// Name derived from the input path.
    pub input: String,
    /// Node count of the input graph.
    pub input_nodes: usize,
    /// Edge count of the input graph.
    pub input_edges: usize,
    /// Strategy that produced the sample.
    pub strategy: StrategyKind,
    /// Seed used, when one was fixed.
    pub seed: Option<u64>,
    /// The sampled graph.
    pub sample: Graph,
    /// Where the sample was written, if anywhere.
    pub output: Option<PathBuf>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when reading, sampling or writing fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use graphsample_cli::cli::{Cli, Command, InputFormat, SampleCommand, TuningArgs, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "0,1\n1,2\n2,3\n3,0\n")?;
/// let cli = Cli {
///     command: Command::Sample(SampleCommand {
///         path: file.path().to_path_buf(),
///         format: InputFormat::EdgeList,
///         strategy: "random-node".into(),
///         ratio: 0.5,
///         seed: Some(1),
///         output: None,
///         tuning: TuningArgs::default(),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.sample.number_of_nodes(), 2);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<SampleSummary, CliError> {
    match cli.command {
        Command::Sample(sample) => {
            Span::current().record("command", field::display("sample"));
            run_sample(sample)
        }
    }
}

#[instrument(
    name = "cli.sample",
    err,
    skip(command),
    fields(
        path = field::Empty,
        format = field::Empty,
        strategy = field::Empty,
        ratio = command.ratio,
        seed = field::Empty,
    ),
)]
pub(super) fn run_sample(command: SampleCommand) -> Result<SampleSummary, CliError> {
    let SampleCommand {
        path,
        format,
        strategy: tag,
        ratio,
        seed,
        output,
        tuning,
    } = command;
    let strategy: StrategyKind = tag.parse()?;
    let text_format = TextFormat::from(format);

    let span = Span::current();
    span.record("path", field::display(path.display()));
    span.record("format", field::display(text_format));
    span.record("strategy", field::display(strategy));
    if let Some(value) = seed {
        span.record("seed", value);
    }

    let mut builder = tuning.apply(SamplerBuilder::new().with_strategy(strategy));
    if let Some(value) = seed {
        builder = builder.with_seed(value);
    }
    let sampler = builder.build()?;

    let graph = text_format.read(open_input(&path)?)?;
    let sample = sampler.sample(&graph, ratio)?;
    if let Some(target) = output.as_deref() {
        write_output(&sample, target)?;
    }

    info!(
        nodes = sample.number_of_nodes(),
        edges = sample.number_of_edges(),
        "command completed"
    );
    Ok(SampleSummary {
        input: derive_input_name(&path),
        input_nodes: graph.number_of_nodes(),
        input_edges: graph.number_of_edges(),
        strategy,
        seed,
        sample,
        output,
    })
}

#[instrument(name = "cli.open_input", err, fields(path = field::Empty))]
pub(super) fn open_input(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

#[instrument(name = "cli.write_output", err, skip(sample), fields(path = %path.display()))]
pub(super) fn write_output(sample: &Graph, path: &Path) -> Result<(), CliError> {
    let file = File::create(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_edge_list(sample, BufWriter::new(file))?;
    Ok(())
}

pub(super) fn derive_input_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "graph".to_owned(), ToOwned::to_owned)
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use graphsample_cli::cli::{SampleSummary, render_summary};
/// # use graphsample_core::{Graph, StrategyKind};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = SampleSummary {
///     input: "demo".into(),
///     input_nodes: 4,
///     input_edges: 4,
///     strategy: StrategyKind::default(),
///     seed: Some(3),
///     sample: Graph::from_edges([(0, 1)]),
///     output: None,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "input: demo (4 nodes, 4 edges)\n\
///      strategy: preservation:random-node\n\
///      seed: 3\n\
///      sample: 2 nodes, 1 edges\n",
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &SampleSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(
        writer,
        "input: {} ({} nodes, {} edges)",
        summary.input, summary.input_nodes, summary.input_edges
    )?;
    writeln!(writer, "strategy: {}", summary.strategy)?;
    match summary.seed {
        Some(seed) => writeln!(writer, "seed: {seed}")?,
        None => writeln!(writer, "seed: entropy")?,
    }
    writeln!(
        writer,
        "sample: {} nodes, {} edges",
        summary.sample.number_of_nodes(),
        summary.sample.number_of_edges()
    )?;
    if let Some(output) = &summary.output {
        writeln!(writer, "output: {}", output.display())?;
    }
    Ok(())
}
