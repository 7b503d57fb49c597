use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::{error::Error, fs, io, path::PathBuf};
use wordtier::{
    config::{ConfigStore, FileConfigStore},
    corpus::{filter::normalize_entry, loader::read_list},
    frequency::PositionalFrequency,
    report, ui, Normalization, SampleRequest, WordFilter, Words,
};

/// leveled word lists with letter-frequency difficulty scoring
#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Cli {
    /// config file to read instead of the default location
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// root directory of the word lists
    #[clap(long, global = true)]
    corpus_dir: Option<PathBuf>,

    /// letter frequency cache file
    #[clap(long, global = true)]
    cache: Option<PathBuf>,

    /// log debug output to stderr
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// list the words in a range of levels
    Words {
        #[clap(flatten)]
        levels: LevelArgs,
        #[clap(flatten)]
        filter: FilterArgs,
    },
    /// draw random words, optionally centred on a level
    Random {
        #[clap(flatten)]
        levels: LevelArgs,
        /// mean of the normal distribution over levels
        #[clap(long)]
        mean: Option<f64>,
        /// standard deviation of the level distribution
        #[clap(long, default_value_t = 1.0)]
        std: f64,
        /// number of words to draw
        #[clap(short = 'n', long, default_value_t = 1)]
        count: usize,
        /// seed for reproducible draws
        #[clap(long)]
        seed: Option<u64>,
        #[clap(flatten)]
        filter: FilterArgs,
    },
    /// score a word's letter frequency and difficulty at a level
    Score {
        word: String,
        #[clap(short, long)]
        level: usize,
    },
    /// recount letter frequencies from the corpus and update the cache
    Generate {
        /// only count words at or below this level
        #[clap(long)]
        max_level: Option<usize>,
        #[clap(long, value_enum, default_value_t = Normalization::Sum)]
        normalization: Normalization,
        /// draw the new table as a bar chart
        #[clap(long)]
        chart: bool,
    },
    /// show the cached letter frequencies
    Frequency {
        /// draw the table as a bar chart
        #[clap(long)]
        chart: bool,
    },
    /// letter frequencies by position within the words of a file
    Positional {
        /// word file, one word per line
        file: PathBuf,
        /// draw each table as a bar chart
        #[clap(long)]
        chart: bool,
    },
    /// letter frequency statistics per level
    Levels {
        #[clap(flatten)]
        levels: LevelArgs,
        #[clap(flatten)]
        filter: FilterArgs,
    },
    /// score every word in a range of levels
    Report {
        #[clap(flatten)]
        levels: LevelArgs,
        /// write every row to this CSV file
        #[clap(long)]
        csv: Option<PathBuf>,
        /// print only the N hardest words
        #[clap(long, default_value_t = 20)]
        top: usize,
        #[clap(flatten)]
        filter: FilterArgs,
    },
    /// find the lists that contain a word
    Search { word: String },
}

#[derive(Args, Debug, Clone)]
struct LevelArgs {
    #[clap(long, default_value_t = 0)]
    min_level: usize,
    /// defaults to the highest level
    #[clap(long)]
    max_level: Option<usize>,
}

impl LevelArgs {
    fn range(&self, highest: usize) -> (usize, usize) {
        (self.min_level, self.max_level.unwrap_or(highest))
    }
}

#[derive(Args, Debug, Clone, Default)]
struct FilterArgs {
    /// shortest word length to keep
    #[clap(long)]
    min_length: Option<usize>,
    /// longest word length to keep
    #[clap(long)]
    max_length: Option<usize>,
    /// only keep words made of these letters
    #[clap(long)]
    allowed: Option<String>,
    /// only keep words containing a vowel
    #[clap(long)]
    vowel_required: bool,
}

impl FilterArgs {
    /// Apply the flags that were given on top of `base`
    fn apply(&self, mut base: WordFilter) -> WordFilter {
        if let Some(len) = self.min_length {
            base = base.min_length(len);
        }
        if let Some(len) = self.max_length {
            base = base.max_length(len);
        }
        if let Some(letters) = &self.allowed {
            base = base.allowed_letters(letters);
        }
        if self.vowel_required {
            base = base.vowel_required(true);
        }
        base
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    run(cli)
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let store = match &cli.config {
        Some(path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new(),
    };
    let mut config = store.load();
    if let Some(dir) = cli.corpus_dir {
        config.corpus_dir = dir;
    }
    if let Some(cache) = cli.cache {
        config.frequency_cache = Some(cache);
    }
    log::debug!("using corpus at {}", config.corpus_dir.display());

    let words = Words::from_config(&config)?;

    match cli.command {
        Command::Words { levels, filter } => {
            let (min, max) = levels.range(words.max_level());
            for word in words.get_words(min, max, &filter.apply(WordFilter::new()))? {
                println!("{word}");
            }
        }
        Command::Random {
            levels,
            mean,
            std,
            count,
            seed,
            filter,
        } => {
            let (min, max) = levels.range(words.max_level());
            let mut request = SampleRequest::new(min, max)
                .std(std)
                .filter(filter.apply(WordFilter::new()));
            if let Some(mean) = mean {
                request = request.mean_level(mean);
            }
            let mut rng = seed
                .map(StdRng::seed_from_u64)
                .unwrap_or_else(StdRng::from_entropy);
            for _ in 0..count {
                let sampled = words.get_random_word(&request, &mut rng)?;
                println!(
                    "{} {} {:.3}",
                    sampled.word, sampled.level, sampled.normalized_level
                );
            }
        }
        Command::Score { word, level } => {
            let scored = words.difficulty(&word, level)?;
            println!("word: {word}");
            println!("level: {level}");
            println!("frequency: {:.6}", scored.frequency);
            println!("difficulty: {:.6}", scored.score);
        }
        Command::Generate {
            max_level,
            normalization,
            chart,
        } => {
            let table = words.generate_letter_frequencies(max_level, normalization)?;
            println!(
                "wrote {} letter frequencies to {}",
                table.len(),
                words.frequency_store().cache().path().display()
            );
            if chart {
                ui::print_frequency_chart("Letter Frequency", &table)?;
            }
        }
        Command::Frequency { chart } => {
            let table = words.frequencies()?;
            if chart {
                ui::print_frequency_chart("Letter Frequency", &table)?;
            } else {
                ui::write_frequency_table(&mut io::stdout(), "letter frequency", &table)?;
            }
        }
        Command::Positional { file, chart } => {
            let list: Vec<String> = read_list(&file)?
                .iter()
                .filter_map(|line| normalize_entry(line))
                .collect();
            let positional = PositionalFrequency::generate(&list)?;

            let tables = std::iter::once(("all positions".to_string(), &positional.total)).chain(
                positional
                    .positions
                    .iter()
                    .enumerate()
                    .map(|(idx, table)| (format!("position {}", idx + 1), table)),
            );
            for (title, table) in tables {
                if chart {
                    ui::print_frequency_chart(&title, table)?;
                } else {
                    ui::write_frequency_table(&mut io::stdout(), &title, table)?;
                }
            }
        }
        Command::Levels { levels, filter } => {
            let (min, max) = levels.range(words.max_level());
            let stats = report::level_stats(&words, min, max, &filter.apply(WordFilter::new()))?;
            println!("level words mean std mean_repeats std_repeats");
            for s in stats {
                println!(
                    "{} {} {} {} {} {}",
                    s.level,
                    s.word_count,
                    fmt_stat(s.mean_frequency),
                    fmt_stat(s.std_frequency),
                    fmt_stat(s.mean_frequency_repeats),
                    fmt_stat(s.std_frequency_repeats),
                );
            }
        }
        Command::Report {
            levels,
            csv,
            top,
            filter,
        } => {
            let (min, max) = levels.range(words.max_level());
            let filter = filter.apply(report::default_report_filter());
            let rows = report::difficulty_report(&words, min, max, &filter)?;
            if let Some(path) = csv {
                report::write_csv(&rows, fs::File::create(&path)?)?;
                println!("wrote {} rows to {}", rows.len(), path.display());
            }
            for row in report::hardest_first(&rows).into_iter().take(top) {
                println!(
                    "{} {} {:.6} {:.6}",
                    row.word, row.level, row.frequency, row.difficulty
                );
            }
        }
        Command::Search { word } => {
            let hits = words.source().search(&word)?;
            if hits.is_empty() {
                println!("{word} not found");
            }
            for hit in hits {
                println!("{} level {} ({})", hit.category, hit.level, hit.path.display());
            }
        }
    }

    Ok(())
}

fn fmt_stat(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.6}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_filter_args_override_base() {
        let args = FilterArgs {
            min_length: Some(6),
            ..FilterArgs::default()
        };
        let filter = args.apply(report::default_report_filter());
        assert_eq!(filter.min_length, Some(6));
        assert!(filter.vowel_required);
    }

    #[test]
    fn test_random_parses_distribution_flags() {
        let cli = Cli::try_parse_from([
            "wordtier", "random", "--max-level", "3", "--mean", "2", "--std", "0.5", "-n", "4",
        ])
        .unwrap();
        match cli.command {
            Command::Random {
                levels,
                mean,
                std,
                count,
                ..
            } => {
                assert_eq!(levels.range(9), (0, 3));
                assert_eq!(mean, Some(2.0));
                assert_eq!(std, 0.5);
                assert_eq!(count, 4);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["wordtier", "search", "cat", "--corpus-dir", "lists"]).unwrap();
        assert_eq!(cli.corpus_dir, Some(PathBuf::from("lists")));
    }
}
