use std::{env, fs::File, path::PathBuf, process::ExitCode, time::Instant};

use book_recommender::{
    config::CliOverrides, Book, BookLoader, BookRecommender, LibraryError, RecommenderConfig,
    Result, TextTokenizer,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Which book to recommend from
enum Origin {
    Id(String),
    Title(String),
}

struct Args {
    config_path: Option<PathBuf>,
    overrides: CliOverrides,
    origin: Option<Origin>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            error!("{e}");
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

// ---- 簡易 CLI 引数処理 ----
// --books FILE               : CSV dataset (env BOOKREC_BOOKS)
// --stopwords FILE           : stopword list (env BOOKREC_STOPWORDS)
// --config FILE              : TOML config
// --id ID | --title TITLE    : origin book
// --top N                    : number of recommendations (env BOOKREC_TOP_N)
// --description-weight W     : weight of description similarity
// --genres-weight W          : weight of genre overlap
fn parse_args<I>(args: I) -> Result<Option<Args>>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut parsed = Args {
        config_path: None,
        overrides: CliOverrides::default(),
        origin: None,
    };
    while let Some(a) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| LibraryError::InvalidInput(format!("{flag} requires a value")))
        };
        match a.as_str() {
            "--books" => parsed.overrides.books_path = Some(PathBuf::from(value("--books")?)),
            "--stopwords" => parsed.overrides.stopwords_path = Some(PathBuf::from(value("--stopwords")?)),
            "--config" => parsed.config_path = Some(PathBuf::from(value("--config")?)),
            "--id" => parsed.origin = Some(Origin::Id(value("--id")?)),
            "--title" => parsed.origin = Some(Origin::Title(value("--title")?)),
            "--top" => parsed.overrides.top_n = Some(parse_number("--top", &value("--top")?)?),
            "--description-weight" => {
                parsed.overrides.description_weight =
                    Some(parse_number("--description-weight", &value("--description-weight")?)?)
            }
            "--genres-weight" => {
                parsed.overrides.genres_weight =
                    Some(parse_number("--genres-weight", &value("--genres-weight")?)?)
            }
            "-h" | "--help" => return Ok(None),
            other => {
                return Err(LibraryError::InvalidInput(format!("unknown argument: {other}")));
            }
        }
    }
    Ok(Some(parsed))
}

fn parse_number<N: std::str::FromStr>(flag: &str, raw: &str) -> Result<N> {
    raw.trim()
        .parse()
        .map_err(|_| LibraryError::InvalidInput(format!("{flag} expects a number, got {raw:?}")))
}

fn print_usage() {
    eprintln!(
        "Usage: book-recommender --books FILE (--id ID | --title TITLE) \
         [--stopwords FILE] [--config FILE] [--top N] \
         [--description-weight W] [--genres-weight W]"
    );
    eprintln!("Output format: <score>\\t<id>\\t<title>");
}

fn run(args: Args) -> Result<()> {
    let program_start = Instant::now();
    let config = RecommenderConfig::load(args.config_path.as_deref(), Some(&args.overrides))?;

    let books_path = config
        .books_path
        .as_ref()
        .ok_or_else(|| LibraryError::InvalidInput("no book dataset given (--books)".to_string()))?;
    let books = BookLoader::new().load_path(books_path)?;

    let tokenizer = match &config.stopwords_path {
        Some(path) => TextTokenizer::from_reader(File::open(path)?)?,
        None => TextTokenizer::default(),
    };
    info!(stopwords = tokenizer.stopwords().len(), "tokenizer ready");

    let origin = args
        .origin
        .ok_or_else(|| LibraryError::InvalidInput("no origin book given (--id or --title)".to_string()))?;
    let origin = find_origin(&books, &origin)?.clone();

    let index_start = Instant::now();
    let recommender = BookRecommender::from_config(books, tokenizer, &config)?;
    let score_start = Instant::now();
    let recommendations = recommender.recommend_books(&origin, config.top_n)?;
    info!(
        origin = %origin.title,
        index_ms = score_start.duration_since(index_start).as_secs_f64() * 1000.0,
        score_ms = score_start.elapsed().as_secs_f64() * 1000.0,
        total_ms = program_start.elapsed().as_secs_f64() * 1000.0,
        "recommendations ready"
    );

    print!("{recommendations}");
    Ok(())
}

fn find_origin<'a>(books: &'a [Book], origin: &Origin) -> Result<&'a Book> {
    let found = match origin {
        Origin::Id(id) => books.iter().find(|b| b.id == *id),
        Origin::Title(title) => books.iter().find(|b| b.title.eq_ignore_ascii_case(title.trim())),
    };
    found.ok_or_else(|| match origin {
        Origin::Id(id) => LibraryError::InvalidInput(format!("no book with id {id:?}")),
        Origin::Title(title) => LibraryError::InvalidInput(format!("no book titled {title:?}")),
    })
}
