//! Application runner logic
//!
//! Dispatches each subcommand to the library pipeline

use crate::core::cli::{CliArgs, Command, CorpusArgs, GenerateArgs, LetterFreqArgs};
use crate::core::config_file::ConfigFile;
use crate::corpus::CorpusAssembler;
use crate::data::{corpus_table, frequencies, ExclusionList, UsageStats};
use crate::dataset::DatasetGenerator;
use crate::logging;
use crate::validity::FontValidityTester;
use anyhow::{anyhow, Context, Result};
use tracing::info;

/// Run the application with the given CLI arguments.
/// Handles special CLI flags and delegates to the subcommand runners.
pub fn run_app(cli_args: CliArgs) -> Result<()> {
    cli_args.validate().map_err(|e| anyhow!(e))?;

    if cli_args.new_config {
        ConfigFile::initialize(cli_args.config.as_deref())
            .context("Failed to initialize settings file")?;
        return Ok(());
    }

    let _guard = logging::init(cli_args.log_dir.as_deref())?;
    let config = ConfigFile::load(cli_args.config.as_deref())?;

    match &cli_args.command {
        Some(Command::Corpus(args)) => run_corpus(args, config),
        Some(Command::Generate(args)) => run_generate(args, config),
        Some(Command::LetterFreqs(args)) => run_letter_freqs(args, config),
        None => Err(anyhow!("No command given")),
    }
}

fn run_corpus(args: &CorpusArgs, config: ConfigFile) -> Result<()> {
    let mut settings = config.corpus;
    args.apply(&mut settings);

    let mut exclusions =
        ExclusionList::new(settings.denylist.iter().cloned(), Vec::<String>::new());
    if let Some(path) = &args.exclusions {
        let records = ExclusionList::read_records(path)
            .with_context(|| format!("Failed to read exclusion list {}", path.display()))?;
        exclusions = exclusions.with_records(&records);
    }

    let stats = UsageStats::load(&args.stats)
        .with_context(|| format!("Failed to load usage stats {}", args.stats.display()))?;
    info!("Loaded usage stats for {} families", stats.len());

    let tester = FontValidityTester::new(
        settings.probe_letters(),
        settings.probe_size,
        settings.probe_canvas(),
        settings.max_identical,
    );
    let rows = CorpusAssembler::new(exclusions, tester)
        .assemble(&args.fonts_dir, &stats)
        .with_context(|| format!("Failed to assemble corpus from {}", args.fonts_dir.display()))?;

    corpus_table::save_corpus(&args.output, &rows)
        .with_context(|| format!("Failed to write corpus table {}", args.output.display()))?;
    info!("Wrote {} fonts to {}", rows.len(), args.output.display());
    Ok(())
}

fn run_generate(args: &GenerateArgs, config: ConfigFile) -> Result<()> {
    let mut settings = config.generation;
    args.apply(&mut settings);

    let fonts = corpus_table::load_ttf_paths(&args.corpus)
        .with_context(|| format!("Failed to read corpus table {}", args.corpus.display()))?;
    info!("Read {} fonts from {}", fonts.len(), args.corpus.display());

    let generator = DatasetGenerator::new(settings, &args.output)?;
    generator.generate(&fonts).context("Dataset generation stopped")?;
    Ok(())
}

fn run_letter_freqs(args: &LetterFreqArgs, config: ConfigFile) -> Result<()> {
    let letters: Vec<char> = match &args.letters {
        Some(letters) => letters.chars().collect(),
        None => config.generation.letters(),
    };

    let words = frequencies::load_word_counts(&args.words)
        .with_context(|| format!("Failed to read word list {}", args.words.display()))?;
    let counts = frequencies::letter_frequencies(
        words.iter().map(|(word, count)| (word.as_str(), *count)),
        &letters,
    );
    frequencies::save_letter_frequencies(&args.output, &counts)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!("Wrote frequencies for {} letters to {}", counts.len(), args.output.display());
    Ok(())
}
