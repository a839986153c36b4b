// Colored terminal output for recommendation lists and profile vectors.
//
// This module handles all terminal-specific formatting. The main.rs command
// handlers delegate here.

use colored::Colorize;

use crate::matching::Recommendation;
use crate::profile::UserProfileVector;

/// Display a ranked recommendation list in the terminal.
pub fn display_recommendations(title: &str, recommendations: &[Recommendation]) {
    println!(
        "\n{}",
        format!("=== {title} ({}) ===", recommendations.len()).bold()
    );

    if recommendations.is_empty() {
        println!("  Nothing cleared the similarity floor.");
        return;
    }

    println!();
    println!(
        "  {:>4}  {:<28} {:<10} {:>6}  {}",
        "Rank".dimmed(),
        "Name".dimmed(),
        "Kind".dimmed(),
        "Score".dimmed(),
        "Reason".dimmed(),
    );
    println!("  {}", "-".repeat(89).dimmed());

    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "  {:>4}. {:<28} {:<10} {}  {}",
            i + 1,
            super::truncate_chars(&rec.name, 25),
            rec.category,
            colorize_similarity(rec.similarity),
            super::truncate_chars(&rec.reason, 80).dimmed(),
        );
    }
    println!();
}

/// Display the weighted terms behind a user's recommendations.
pub fn display_profile_vector(vector: &UserProfileVector) {
    println!(
        "\n{}",
        format!("=== Profile vector for {} ===", vector.user_id).bold()
    );

    let sections = [
        ("Skills", &vector.skills),
        ("Domains", &vector.domains),
        ("Goals", &vector.goals),
    ];
    for (label, terms) in sections {
        let mut sorted: Vec<(&String, &f64)> = terms.iter().collect();
        sorted.sort_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)));
        let rendered: Vec<String> = sorted
            .iter()
            .map(|(term, weight)| format!("{term} ({weight:.1})"))
            .collect();
        let line = if rendered.is_empty() {
            "none".to_string()
        } else {
            rendered.join(", ")
        };
        println!("  {:<8} {}", format!("{label}:"), line.dimmed());
    }
}

/// Colorize a similarity score by strength.
fn colorize_similarity(similarity: f64) -> colored::ColoredString {
    let text = format!("{similarity:>6.2}");
    if similarity >= 0.7 {
        text.bright_green().bold()
    } else if similarity >= 0.4 {
        text.bright_yellow()
    } else {
        text.bright_blue()
    }
}
