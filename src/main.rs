use chrono::Datelike;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use commitcanvas::models::{ContributionDay, ProfileSnapshot, VisualizationSettings, VisualizationType};
use commitcanvas::palette::ColorPalette;
use commitcanvas::{Config, GitHubClient, PipelineConfig, ProfilePipeline, SettingsStore};

const LEVEL_GLYPHS: [char; 5] = ['·', '░', '▒', '▓', '█'];
const SKYLINE_HEIGHT: usize = 8;

#[derive(Parser, Debug)]
#[command(name = "commitcanvas")]
#[command(version = "0.1.0")]
#[command(about = "Render a GitHub user's contributions, repositories and languages")]
struct Args {
    /// GitHub username to render
    #[arg(short, long)]
    username: String,

    /// Output format (json, text, markdown)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Contribution view (skyline, calendar); defaults to the saved preference
    #[arg(long)]
    view: Option<VisualizationType>,

    /// Color palette for contribution levels; defaults to the saved preference
    #[arg(long)]
    palette: Option<ColorPalette>,

    /// Preferences database path (overrides SETTINGS_DB)
    #[arg(long)]
    database: Option<String>,

    /// Persist --view/--palette as the new defaults
    #[arg(long)]
    save_settings: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("commitcanvas=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();
    let config = Config::from_env()?;

    // Load preferences, then apply CLI overrides
    let mut store = SettingsStore::new(args.database.as_deref().unwrap_or(&config.settings_db))?;
    let mut settings = store.load()?;
    if let Some(view) = args.view {
        settings.visualization_type = view;
    }
    if let Some(palette) = args.palette {
        settings.color_palette = palette;
    }
    if args.save_settings {
        store.save(&settings)?;
        tracing::info!("Saved preferences");
    }

    // Initialize client
    let github = GitHubClient::from_config(&config)?;
    tracing::debug!("Response cache TTL: {}s", config.cache_ttl_secs);

    let progress = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} repos")
    {
        progress.set_style(style.progress_chars("#>-"));
    }

    let pipeline = ProfilePipeline::new(github, PipelineConfig::from(&config)).with_progress(progress);

    let snapshot = match pipeline.load(&args.username).await {
        Ok(snapshot) => snapshot,
        Err(e) if e.is_not_found() => {
            tracing::warn!("No GitHub user named {}", args.username);
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    // Output results
    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(&snapshot)?,
        "markdown" => format_markdown(&snapshot, &settings),
        _ => format_text(&snapshot, &settings),
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_text(snapshot: &ProfileSnapshot, settings: &VisualizationSettings) -> String {
    let user = &snapshot.user;
    let summary = &snapshot.contributions;
    let mut output = String::new();

    output.push_str(&format!("\n=== {} ===\n\n", user.login));
    if let Some(ref name) = user.name {
        output.push_str(&format!("Name: {}\n", name));
    }
    if let Some(ref bio) = user.bio {
        output.push_str(&format!("Bio: {}\n", bio));
    }
    for (label, value) in [
        ("Company", &user.company),
        ("Location", &user.location),
        ("Blog", &user.blog),
        ("Email", &user.email),
    ] {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            output.push_str(&format!("{}: {}\n", label, value));
        }
    }
    output.push_str(&format!(
        "Repositories: {}  Followers: {}  Following: {}\n",
        user.public_repos, user.followers, user.following
    ));
    output.push_str(&format!("Profile: {}\n\n", user.html_url));

    output.push_str(&format!(
        "Contributions: {}  Current streak: {} days  Longest streak: {} days\n\n",
        summary.total_contributions, summary.current_streak, summary.longest_streak
    ));

    match settings.visualization_type {
        VisualizationType::Calendar => output.push_str(&render_calendar(&summary.contribution_days)),
        VisualizationType::Skyline => output.push_str(&render_skyline(&summary.contribution_days)),
    }
    if settings.show_legend {
        output.push_str(&render_legend(settings));
    }

    if !snapshot.languages.is_empty() {
        output.push_str("\nLanguages:\n");
        for language in &snapshot.languages {
            let width = (language.percentage / 2.5).round() as usize;
            output.push_str(&format!(
                "  {:<14} {:>5.1}% {} {}\n",
                language.name,
                language.percentage,
                "█".repeat(width),
                language.color
            ));
        }
    }

    let top = snapshot.top_repositories(10);
    if !top.is_empty() {
        output.push_str("\nTop Repositories:\n");
        for repo in top {
            output.push_str(&format!(
                "  ★ {:<5} ⑂ {:<4} {}{}\n",
                repo.stargazers_count,
                repo.forks_count,
                repo.full_name,
                repo.language
                    .as_deref()
                    .map(|l| format!(" ({})", l))
                    .unwrap_or_default()
            ));
        }
    }

    output.push_str(&format!(
        "\nFetched on: {}\n",
        snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

fn format_markdown(snapshot: &ProfileSnapshot, settings: &VisualizationSettings) -> String {
    let user = &snapshot.user;
    let summary = &snapshot.contributions;
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", user.name.as_deref().unwrap_or(&user.login)));
    if let Some(ref bio) = user.bio {
        output.push_str(&format!("> {}\n\n", bio));
    }

    output.push_str("## Summary\n\n");
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!("| Repositories | {} |\n", user.public_repos));
    output.push_str(&format!("| Followers | {} |\n", user.followers));
    output.push_str(&format!("| Contributions | {} |\n", summary.total_contributions));
    output.push_str(&format!("| Current Streak | {} |\n", summary.current_streak));
    output.push_str(&format!("| Longest Streak | {} |\n", summary.longest_streak));

    output.push_str("\n## Contributions\n\n```\n");
    match settings.visualization_type {
        VisualizationType::Calendar => output.push_str(&render_calendar(&summary.contribution_days)),
        VisualizationType::Skyline => output.push_str(&render_skyline(&summary.contribution_days)),
    }
    output.push_str("```\n");

    if !snapshot.languages.is_empty() {
        output.push_str("\n## Languages\n\n");
        output.push_str("| Language | Share | Bytes | Color |\n");
        output.push_str("|----------|-------|-------|-------|\n");
        for language in &snapshot.languages {
            output.push_str(&format!(
                "| {} | {:.1}% | {} | `{}` |\n",
                language.name, language.percentage, language.size, language.color
            ));
        }
    }

    let top = snapshot.top_repositories(10);
    if !top.is_empty() {
        output.push_str("\n## Top Repositories\n\n");
        for repo in top {
            output.push_str(&format!(
                "- [{}]({}) ★ {}{}\n",
                repo.name,
                repo.html_url,
                repo.stargazers_count,
                repo.description
                    .as_deref()
                    .map(|d| format!(": {}", d))
                    .unwrap_or_default()
            ));
        }
    }

    output.push_str(&format!(
        "\n---\n*Fetched on {}*\n",
        snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}

fn render_calendar(days: &[ContributionDay]) -> String {
    // Seven weekday rows, Sunday first, one column per week
    let Some(first) = days.first() else {
        return "No contributions recorded\n".to_string();
    };

    let offset = first.date.weekday().num_days_from_sunday() as usize;
    let weeks = (offset + days.len()).div_ceil(7);
    let mut grid = vec![vec![' '; weeks]; 7];

    for day in days {
        let index = offset + (day.date - first.date).num_days() as usize;
        if let Some(cell) = grid
            .get_mut(index % 7)
            .and_then(|row| row.get_mut(index / 7))
        {
            *cell = LEVEL_GLYPHS[day.level.min(4) as usize];
        }
    }

    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>() + "\n")
        .collect()
}

fn render_skyline(days: &[ContributionDay]) -> String {
    // One building per week, scaled to the busiest week
    if days.is_empty() {
        return "No contributions recorded\n".to_string();
    }

    let weekly: Vec<u32> = days
        .chunks(7)
        .map(|week| week.iter().map(|d| d.count).sum())
        .collect();
    let peak = weekly.iter().copied().max().unwrap_or(0).max(1);

    let heights: Vec<usize> = weekly
        .iter()
        .map(|&total| {
            let scaled = (total as f64 / peak as f64 * SKYLINE_HEIGHT as f64).ceil() as usize;
            scaled.min(SKYLINE_HEIGHT)
        })
        .collect();

    let mut output = String::new();
    for row in (1..=SKYLINE_HEIGHT).rev() {
        let line: String = heights
            .iter()
            .map(|&h| if h >= row { '█' } else { ' ' })
            .collect();
        output.push_str(line.trim_end());
        output.push('\n');
    }
    output.push_str(&"▔".repeat(heights.len()));
    output.push('\n');
    output
}

fn render_legend(settings: &VisualizationSettings) -> String {
    let swatches: Vec<String> = (0..5u8)
        .map(|level| format!("{} {}", LEVEL_GLYPHS[level as usize], settings.contribution_color(level)))
        .collect();
    format!("Less  {}  More ({})\n", swatches.join("  "), settings.color_palette)
}
