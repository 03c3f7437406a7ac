use anyhow::{Result, anyhow, bail};
use catalog::{MovieSummary, ScoredMovie};
use clap::{Parser, Subcommand};
use colored::Colorize;
use explorer::{Exploration, ExplorerConfig, MovieExplorer};
use rand::Rng;
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::debug;

/// Movie Graph - browse a movie catalog and find similar movies
#[derive(Parser)]
#[command(name = "movie-graph")]
#[command(about = "Search a movie graph and rank similar movies by shared cast, crew, genre and era", long_about = None)]
struct Cli {
    /// Directory holding movies.dat, features.dat and directed_by.dat
    /// (overrides MOVIE_GRAPH_DATA_DIR)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for movies whose title contains a fragment
    Search {
        /// Title fragment (case-sensitive; empty lists the whole catalog)
        #[arg(long, default_value = "")]
        title: String,
    },

    /// Rank the movies most similar to one title
    Recommend {
        /// Exact title of the reference movie
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long)]
        limit: Option<usize>,

        /// Show what each score is made of
        #[arg(long)]
        explain: bool,
    },

    /// Search, then list recommendations for every match
    Explore {
        /// Title fragment (case-sensitive)
        #[arg(long, default_value = "")]
        title: String,
    },

    /// Pick one movie at random
    Random,

    /// Run benchmark to test recommendation latency
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of requests in flight at once
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ExplorerConfig::from_env()?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    debug!(?config, "Resolved configuration");

    if !cli.json {
        println!("Loading movie graph from {}...", config.data_dir.display());
    }
    let start = Instant::now();
    let explorer = MovieExplorer::load(&config)?;
    if !cli.json {
        println!("{} Loaded catalog in {:?}", "✓".green(), start.elapsed());
    }

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Search { title } => handle_search(&explorer, &title, cli.json).await?,
        Commands::Recommend {
            title,
            limit,
            explain,
        } => {
            let limit = limit.unwrap_or(explorer.limit());
            handle_recommend(&explorer, &title, limit, explain, cli.json).await?
        }
        Commands::Explore { title } => handle_explore(&explorer, &title, cli.json).await?,
        Commands::Random => handle_random(&explorer, cli.json).await?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(&explorer, requests, concurrent).await?,
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Handle the 'search' command
async fn handle_search(explorer: &MovieExplorer, fragment: &str, json: bool) -> Result<()> {
    let movies = explorer.search(fragment).await?;
    if json {
        return print_json(&movies);
    }

    println!("{}", format!("Search results for '{}':", fragment).bold().blue());
    if movies.is_empty() {
        println!("No movies found.");
    }
    for movie in &movies {
        print_movie(movie);
    }
    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    explorer: &MovieExplorer,
    title: &str,
    limit: usize,
    explain: bool,
    json: bool,
) -> Result<()> {
    let recommendations = explorer.recommend(title, limit).await?;
    if json {
        return print_json(&recommendations);
    }

    println!("{}", format!("Movies similar to '{}':", title).bold().blue());
    print_recommendations(&recommendations, explain);
    Ok(())
}

/// Handle the 'explore' command
async fn handle_explore(explorer: &MovieExplorer, fragment: &str, json: bool) -> Result<()> {
    let explorations = explorer.explore(fragment).await?;
    if json {
        return print_json(&explorations);
    }

    if explorations.is_empty() {
        println!("No movies found.");
    }
    for Exploration {
        movie,
        recommendations,
        error,
    } in &explorations
    {
        print_movie(movie);
        println!("  {}", "Recommended:".bold());
        match error {
            Some(error) => println!("  {}", error.red()),
            None => print_recommendations(recommendations, false),
        }
        println!();
    }
    Ok(())
}

/// Handle the 'random' command
async fn handle_random(explorer: &MovieExplorer, json: bool) -> Result<()> {
    let movie = explorer.surprise().await?;
    if json {
        return print_json(&movie);
    }

    match movie {
        Some(movie) => {
            println!("{}", "Surprise pick:".bold().blue());
            print_movie(&movie);
        }
        None => println!("No movies found."),
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    explorer: &MovieExplorer,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }
    let titles: Vec<String> = explorer
        .search("")
        .await?
        .into_iter()
        .map(|m| m.title)
        .collect();
    if titles.is_empty() {
        return Err(anyhow!("Catalog is empty, nothing to benchmark"));
    }

    // Random reference titles, drawn up front
    let picks: Vec<String> = {
        let mut rng = rand::rng();
        (0..requests)
            .map(|_| titles[rng.random_range(0..titles.len())].clone())
            .collect()
    };

    let permits = std::sync::Arc::new(tokio::sync::Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();

    // Use tokio::spawn to make concurrent requests
    let mut handles = vec![];
    for title in picks {
        let explorer = explorer.clone();
        let permits = permits.clone();
        let handle = tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let start = Instant::now();
            explorer.recommend_default(&title).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    let mut timings = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }
    let wall_time = wall_clock.elapsed();

    let total_latency: Duration = timings.iter().sum();
    let avg_latency = total_latency / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[percentile_index(timings.len(), 0.95)];
    let p99 = timings[percentile_index(timings.len(), 0.99)];
    let throughput = requests as f64 / wall_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

fn percentile_index(len: usize, quantile: f64) -> usize {
    ((len as f64 * quantile) as usize).min(len - 1)
}

fn format_year(year: Option<u16>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "?".to_string())
}

/// Print one movie with its cast and crew
fn print_movie(movie: &MovieSummary) {
    println!(
        "{} ({}) [{}]",
        movie.title.bold(),
        format_year(movie.year),
        movie.genre.as_deref().unwrap_or("unknown genre")
    );
    print_names("Actors", "No actors found", &movie.actors);
    print_names("Directors", "No directors found", &movie.directors);
}

fn print_names<'a>(label: &str, empty: &str, names: impl IntoIterator<Item = &'a String>) {
    let names: Vec<&str> = names.into_iter().map(String::as_str).collect();
    if names.is_empty() {
        println!("{}{}", "• ".green(), empty);
    } else {
        println!("{}{}: {}", "• ".green(), label, names.join(", "));
    }
}

/// Format and print recommendations
fn print_recommendations(recommendations: &[ScoredMovie], explain: bool) {
    if recommendations.is_empty() {
        println!("  No recommendations found.");
    }
    for (index, movie) in recommendations.iter().enumerate() {
        println!(
            "{}. {} ({}) [{}] - Score: {:.2}",
            (index + 1).to_string().green(),
            movie.title,
            format_year(movie.year),
            movie.genre.as_deref().unwrap_or("unknown genre"),
            movie.score
        );
        if explain {
            let b = &movie.breakdown;
            println!(
                "   {} shared actors, {} shared directors, genre match: {}, within 5 years: {}",
                b.shared_actors, b.shared_directors, b.genre_match, b.year_proximity
            );
        }
    }
}
