//! Plain-text allocation report

use squad_core::allocation::{AllocationResult, FairnessReport, LineFairness, Selection};
use squad_core::models::{Player, Team};

/// Render teams, scores, the per-line fairness table and how the attempt was chosen.
pub fn render_report(result: &AllocationResult) -> String {
    let mut lines: Vec<String> = Vec::new();

    for (idx, team) in result.teams().iter().enumerate() {
        lines.extend(team_lines(idx + 1, team));
    }

    lines.push(String::new());
    lines.push(format!("Balance Difference: {:.1}", result.chosen.score_spread()));

    lines.extend(fairness_lines(&result.chosen.fairness));

    lines.push(String::new());
    lines.push(selection_line(result));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn team_lines(number: usize, team: &Team) -> Vec<String> {
    let mut lines = vec![String::new(), format!("Team {}:", number)];
    lines.extend(team.players.iter().enumerate().map(|(i, player)| player_line(i + 1, player)));

    let (weak, balanced, strong, unknown) = team.strength_counts();
    lines.push(format!("Team {} Score: {:.1} (Players: {})", number, team.score(), team.len()));
    lines.push(format!(
        "Strength: {} strong, {} balanced, {} weak, {} unknown",
        strong, balanced, weak, unknown
    ));
    lines
}

fn player_line(number: usize, player: &Player) -> String {
    let gk_flag = if player.is_goalkeeper() { " (GK)" } else { "" };
    format!(
        "{}. {} (Tier: {:.1}){} [{}]",
        number, player.name, player.tier, gk_flag, player.strength
    )
}

fn fairness_lines(fairness: &FairnessReport) -> Vec<String> {
    if !fairness.evaluated {
        return vec!["Line fairness: not checked (only compared for two teams)".to_string()];
    }

    let mut lines = vec![
        String::new(),
        "Line  Median (T1/T2, Δ ≤ tol)     IQR (T1/T2, Δ ≤ tol)        OK".to_string(),
    ];
    lines.extend(fairness.lines.iter().map(line_fairness_row));
    lines
}

fn line_fairness_row(line: &LineFairness) -> String {
    format!(
        "{:<4}  {:.2}/{:.2}, {:.2} ≤ {:.2}       {:.2}/{:.2}, {:.2} ≤ {:.2}       {}",
        line.line,
        line.median_team1,
        line.median_team2,
        line.median_delta,
        line.median_tolerance,
        line.iqr_team1,
        line.iqr_team2,
        line.iqr_delta,
        line.iqr_tolerance,
        if line.is_compliant() { "yes" } else { "no" }
    )
}

fn selection_line(result: &AllocationResult) -> String {
    match result.selection {
        Selection::Accepted => format!(
            "Attempt {} of {} accepted: every line within tolerance.",
            result.chosen.attempt_index,
            result.attempts.len()
        ),
        Selection::Fallback => format!(
            "No attempt met the tolerances after {} tries; using attempt {} (violation {:.3}).",
            result.retries_used,
            result.chosen.attempt_index,
            result.chosen.fairness.violation_score
        ),
    }
}
