// Neutral gray for anything not in the table
pub const DEFAULT_LANGUAGE_COLOR: &str = "#858585";

pub fn language_color(language: &str) -> &'static str {
    match language {
        "JavaScript" => "#f1e05a",
        "TypeScript" => "#3178c6",
        "Python" => "#3572A5",
        "Java" => "#b07219",
        "Go" => "#00ADD8",
        "Rust" => "#dea584",
        "C++" => "#f34b7d",
        "PHP" => "#4F5D95",
        "Ruby" => "#701516",
        "HTML" => "#e34c26",
        "CSS" => "#563d7c",
        "Swift" => "#ffac45",
        "Kotlin" => "#A97BFF",
        "Dart" => "#00B4AB",
        "C#" => "#178600",
        "Shell" => "#89e051",
        "Vue" => "#41b883",
        "Jupyter" => "#DA5B0B",
        "Markdown" => "#083fa1",
        "SCSS" => "#c6538c",
        _ => DEFAULT_LANGUAGE_COLOR,
    }
}
