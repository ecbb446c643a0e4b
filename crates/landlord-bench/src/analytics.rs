use std::collections::HashMap;
use std::fs;
use std::path::Path;

use landlord_core::model::player::Team;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;

use crate::config::BenchmarkConfig;
use crate::tournament::GameOutcome;

const CONFIDENCE_Z: f64 = 1.96; // 95% CI

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("baseline agent is not configured")]
    MissingBaseline,
    #[error("agent '{0}' defined in results but missing from configuration")]
    UnknownAgent(String),
    #[error("baseline '{0}' missing for deal {1}")]
    MissingBaselineDeal(String, String),
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Folds per-game outcomes into per-agent reports.
pub struct AnalyticsCollector {
    baseline: String,
    agents: HashMap<String, AgentAccumulator>,
    comparisons: HashMap<String, Vec<f64>>,
    agent_order: Vec<String>,
    latency_budget_ms: u64,
}

impl AnalyticsCollector {
    pub fn new(config: &BenchmarkConfig) -> Result<Self, AnalyticsError> {
        let baseline = config
            .metrics
            .baseline
            .clone()
            .ok_or(AnalyticsError::MissingBaseline)?;

        let agents = config
            .agents
            .iter()
            .map(|agent| (agent.name.clone(), AgentAccumulator::default()))
            .collect();
        let agent_order = config.agents.iter().map(|agent| agent.name.clone()).collect();

        Ok(Self {
            baseline,
            agents,
            comparisons: HashMap::new(),
            agent_order,
            latency_budget_ms: config.metrics.latency_budget_ms,
        })
    }

    pub fn record_game(
        &mut self,
        deal_id: &str,
        outcome: &GameOutcome,
    ) -> Result<(), AnalyticsError> {
        let baseline_points = outcome
            .seat_results
            .iter()
            .find(|seat| seat.agent_name == self.baseline)
            .map(|seat| seat.points as f64)
            .ok_or_else(|| {
                AnalyticsError::MissingBaselineDeal(self.baseline.clone(), deal_id.to_string())
            })?;

        for seat in &outcome.seat_results {
            let acc = self
                .agents
                .get_mut(&seat.agent_name)
                .ok_or_else(|| AnalyticsError::UnknownAgent(seat.agent_name.clone()))?;

            acc.games += 1;
            acc.per_game_points.push(seat.points as f64);
            acc.wins += u32::from(seat.won);
            if seat.role == Some(Team::Landlord) {
                acc.landlord_games += 1;
                acc.landlord_wins += u32::from(seat.won);
            }
            acc.springs += u32::from(seat.won && outcome.spring);
            acc.total_latency_ms += seat.metrics.total_ms;
            acc.total_decisions += u64::from(seat.metrics.decisions);

            if seat.agent_name != self.baseline {
                self.comparisons
                    .entry(seat.agent_name.clone())
                    .or_default()
                    .push(seat.points as f64 - baseline_points);
            }
        }

        Ok(())
    }

    pub fn finalize(mut self) -> AnalyticsSummary {
        let mut agents = Vec::with_capacity(self.agent_order.len());
        for name in &self.agent_order {
            let Some(acc) = self.agents.remove(name) else {
                continue;
            };
            let diffs = self.comparisons.remove(name).unwrap_or_default();
            let (p_value, _) = wilcoxon_signed_rank(diffs);
            agents.push(acc.into_report(name.clone(), self.latency_budget_ms, p_value));
        }

        let baseline_avg = agents
            .iter()
            .find(|agent| agent.name == self.baseline)
            .map(|agent| agent.avg_points)
            .unwrap_or(0.0);
        for agent in &mut agents {
            agent.delta_vs_baseline = agent.avg_points - baseline_avg;
        }

        AnalyticsSummary {
            baseline: self.baseline,
            agents,
            latency_budget_ms: self.latency_budget_ms,
        }
    }
}

#[derive(Default)]
struct AgentAccumulator {
    games: u32,
    wins: u32,
    landlord_games: u32,
    landlord_wins: u32,
    springs: u32,
    per_game_points: Vec<f64>,
    total_latency_ms: f64,
    total_decisions: u64,
}

impl AgentAccumulator {
    fn into_report(self, name: String, latency_budget_ms: u64, p_value: f64) -> AgentReport {
        let avg_points = if self.games == 0 {
            0.0
        } else {
            self.per_game_points.iter().sum::<f64>() / f64::from(self.games)
        };
        let avg_latency = if self.total_decisions == 0 {
            0.0
        } else {
            self.total_latency_ms / self.total_decisions as f64
        };

        AgentReport {
            name,
            games: self.games,
            avg_points,
            ci95: confidence_interval(&self.per_game_points),
            wins: self.wins,
            landlord_games: self.landlord_games,
            landlord_wins: self.landlord_wins,
            springs: self.springs,
            average_ms_per_decision: avg_latency,
            delta_vs_baseline: 0.0,
            p_value,
            over_budget: avg_latency > latency_budget_ms as f64,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyticsSummary {
    pub baseline: String,
    pub agents: Vec<AgentReport>,
    pub latency_budget_ms: u64,
}

impl AnalyticsSummary {
    pub fn write_markdown(&self, path: impl AsRef<Path>) -> Result<(), AnalyticsError> {
        let mut rows = String::new();
        rows.push_str("# Tournament Summary\n\n");
        rows.push_str(&format!(
            "Baseline: `{}`. Latency budget: {} ms average per decision.\n\n",
            self.baseline, self.latency_budget_ms
        ));
        rows.push_str("| Agent | Games | Avg pts | Δ vs baseline | 95% CI | Win % | Landlord % | Landlord win % | Springs | Avg ms/decision | Over Budget | p-value |\n");
        rows.push_str("|-------|-------|---------|---------------|--------|-------|------------|----------------|---------|-----------------|-------------|---------|\n");

        for agent in &self.agents {
            rows.push_str(&format!(
                "| {name} | {games} | {avg:.3} | {delta:+.3} | [{ci_low:.3}, {ci_high:.3}] | {win:.1}% | {landlord:.1}% | {landlord_win:.1}% | {springs} | {latency:.2} | {over_budget} | {pval:.3} |\n",
                name = agent.name,
                games = agent.games,
                avg = agent.avg_points,
                delta = agent.delta_vs_baseline,
                ci_low = agent.ci95.0,
                ci_high = agent.ci95.1,
                win = percent(agent.wins, agent.games),
                landlord = percent(agent.landlord_games, agent.games),
                landlord_win = percent(agent.landlord_wins, agent.landlord_games),
                springs = agent.springs,
                latency = agent.average_ms_per_decision,
                over_budget = if agent.over_budget { "Yes" } else { "No" },
                pval = agent.p_value,
            ));
        }

        fs::write(path.as_ref(), rows).map_err(|source| AnalyticsError::Io {
            context: "writing summary markdown",
            source,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentReport {
    pub name: String,
    pub games: u32,
    pub avg_points: f64,
    pub ci95: (f64, f64),
    pub wins: u32,
    pub landlord_games: u32,
    pub landlord_wins: u32,
    pub springs: u32,
    pub average_ms_per_decision: f64,
    pub delta_vs_baseline: f64,
    pub p_value: f64,
    #[serde(skip)]
    pub over_budget: bool,
}

fn percent(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) * 100.0 / f64::from(whole)
    }
}

fn confidence_interval(points: &[f64]) -> (f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0);
    }
    let mean = points.iter().sum::<f64>() / points.len() as f64;
    if points.len() == 1 {
        return (mean, mean);
    }
    let variance = points
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / (points.len() as f64 - 1.0);
    let margin = CONFIDENCE_Z * (variance / points.len() as f64).sqrt();
    (mean - margin, mean + margin)
}

/// Two-sided signed-rank test on paired differences; returns `(p, non-zero pairs)`.
fn wilcoxon_signed_rank(diffs: Vec<f64>) -> (f64, usize) {
    let mut paired: Vec<(f64, f64)> = diffs
        .into_iter()
        .filter(|d| d.abs() > f64::EPSILON)
        .map(|d| (d.abs(), d.signum()))
        .collect();
    let n = paired.len();
    if n == 0 {
        return (1.0, 0);
    }
    paired.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut w_plus = 0.0;
    let mut w_minus = 0.0;
    let mut tie_adjustment = 0.0;
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && (paired[j + 1].0 - paired[i].0).abs() < 1e-12 {
            j += 1;
        }
        let rank = (i + j + 2) as f64 / 2.0;
        for (_, sign) in &paired[i..=j] {
            if *sign > 0.0 {
                w_plus += rank;
            } else {
                w_minus += rank;
            }
        }
        let ties = (j - i + 1) as f64;
        tie_adjustment += (ties.powi(3) - ties) / 48.0;
        i = j + 1;
    }

    let n_f = n as f64;
    let mean_w = n_f * (n_f + 1.0) / 4.0;
    let variance_w = n_f * (n_f + 1.0) * (2.0 * n_f + 1.0) / 24.0 - tie_adjustment;
    if variance_w <= 0.0 {
        return (1.0, n);
    }

    let Ok(normal) = Normal::new(0.0, 1.0) else {
        return (1.0, n);
    };
    let z = ((w_plus.min(w_minus) - mean_w).abs() - 0.5) / variance_w.sqrt();
    let p = 2.0 * (1.0 - normal.cdf(z));
    (p.clamp(0.0, 1.0), n)
}
