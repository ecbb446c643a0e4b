mod permutations;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::analytics::{AnalyticsCollector, AnalyticsError};
use landlord_bot::bot::{BotDifficulty, BotFeatures};
use landlord_bot::policy::{HeuristicPolicy, Policy, PolicyContext};
use landlord_core::game::match_state::MatchState;
use landlord_core::game::protocol::Request;
use landlord_core::game::round::RoundPhase;
use landlord_core::model::player::{NUM_PLAYERS, PlayerPosition, Team};
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{AgentConfig, BenchmarkConfig, MAX_SEAT_PERMUTATIONS, ResolvedOutputs};

use permutations::SeatPermutations;

/// Upper bound on requests in one game; a stuck policy surfaces as an error.
const MAX_REQUESTS_PER_GAME: usize = 2_000;

/// Plays seeded deals between three configured agents.
pub struct TournamentRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
    agents: Vec<AgentBlueprint>,
    seat_permutations: SeatPermutations,
    logging_enabled: bool,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub games_played: usize,
    pub permutations: usize,
    pub rows_written: usize,
    pub voided_games: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
}

impl TournamentRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        let agents = AgentBlueprint::from_configs(&config.agents)?;

        if agents.len() != NUM_PLAYERS {
            return Err(RunnerError::SeatCount {
                found: agents.len(),
            });
        }

        if config.deals.permutations > MAX_SEAT_PERMUTATIONS {
            return Err(RunnerError::PermutationLimit {
                requested: config.deals.permutations,
                max: MAX_SEAT_PERMUTATIONS,
            });
        }

        let seat_permutations = SeatPermutations::new(config.deals.permutations);

        Ok(Self {
            logging_enabled: config.logging.enable_structured,
            config,
            outputs,
            agents,
            seat_permutations,
        })
    }

    /// Execute the tournament, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let permutations = self.seat_permutations.as_slice();
        let mut rng = StdRng::seed_from_u64(self.config.deals.seed.unwrap_or(0));
        let mut rows_written = 0usize;
        let mut voided_games = 0usize;
        let mut analytics = AnalyticsCollector::new(&self.config)?;

        for game_index in 0..self.config.deals.games {
            let base_seed = rng.next_u64();

            for (perm_index, perm) in permutations.iter().enumerate() {
                let deal_id = format!("G{game_index:05}_P{perm_index:02}");
                let outcome = self.play_game(&deal_id, base_seed, perm)?;
                analytics.record_game(&deal_id, &outcome)?;
                voided_games += usize::from(outcome.voided);
                rows_written += write_game_rows(
                    &mut writer,
                    &self.config.run_id,
                    &deal_id,
                    game_index,
                    perm_index,
                    base_seed,
                    &outcome,
                )?;
            }
        }

        writer.flush()?;

        analytics
            .finalize()
            .write_markdown(&self.outputs.summary_md)?;

        Ok(RunSummary {
            games_played: self.config.deals.games,
            permutations: permutations.len(),
            rows_written,
            voided_games,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
        })
    }

    fn play_game(
        &self,
        deal_id: &str,
        base_seed: u64,
        permutation: &[usize; NUM_PLAYERS],
    ) -> Result<GameOutcome, RunnerError> {
        let mut match_state = MatchState::with_seed_and_rules(
            base_seed,
            1,
            PlayerPosition::South,
            self.config.rules,
        );
        let mut seats = build_seat_states(permutation, &self.agents)?;
        let mut requests = 0usize;

        loop {
            if match_state.is_game_over() {
                break;
            }
            if match_state.needs_redeal() {
                if match_state.redeals() >= self.config.deals.max_redeals {
                    break;
                }
                match_state.redeal();
                continue;
            }

            requests += 1;
            if requests > MAX_REQUESTS_PER_GAME {
                return Err(RunnerError::game(format!(
                    "deal {deal_id} did not finish within {MAX_REQUESTS_PER_GAME} requests"
                )));
            }

            let validator = match_state.validator();
            let seat = validator.current_player();
            let seat_state = &mut seats[seat.index()];
            let ctx = PolicyContext::from_validator(validator, seat, seat_state.features);

            let start = Instant::now();
            let request = match validator.phase() {
                RoundPhase::Bidding => Request::Bid {
                    player: seat,
                    amount: seat_state.policy.choose_bid(&ctx),
                },
                RoundPhase::Playing => seat_state.policy.choose_play(&ctx).into_request(seat),
                RoundPhase::Finished(_) => break,
            };
            let elapsed_ms = seat_state.metrics.record(start.elapsed());

            if self.logging_enabled && tracing::enabled!(Level::INFO) {
                event!(
                    target: "landlord_bench::play",
                    Level::INFO,
                    run_id = %self.config.run_id,
                    deal_id,
                    seat = %seat,
                    bot = %seat_state.agent_name,
                    request = request.label(),
                    elapsed_ms
                );
            }

            let label = request.label();
            let response = match_state.validator_mut().handle(request);
            if let Some(rejection) = response.rejection() {
                return Err(RunnerError::game(format!(
                    "{label} from {seat} rejected in deal {deal_id}: {rejection}"
                )));
            }
        }

        let validator = match_state.validator();
        let landlord = validator.landlord();
        let bid = validator.bid_amount();
        let bombs = validator.bombs_played();
        let redeals = match_state.redeals();
        let voided = !match_state.is_game_over();
        let spring = validator.settlement().is_some_and(|s| s.spring);
        let winner = validator.settlement().map(|s| s.winner);
        let settlement = match_state.finish_game_and_start_next();
        let scores = *match_state.scores().standings();

        let seat_results = seats
            .into_iter()
            .map(|seat| {
                let role = landlord.map(|landlord| Team::of(seat.seat, landlord));
                SeatResult {
                    points: scores[seat.seat.index()],
                    won: role.is_some() && role == winner,
                    role,
                    agent_name: seat.agent_name,
                    seat: seat.seat,
                    metrics: seat.metrics.finalize(),
                }
            })
            .collect();

        Ok(GameOutcome {
            seat_results,
            landlord,
            bid: if settlement.is_some() { bid } else { 0 },
            bombs,
            spring,
            redeals,
            voided,
        })
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_game_rows(
    writer: &mut BufWriter<File>,
    run_id: &str,
    deal_id: &str,
    game_index: usize,
    permutation_index: usize,
    base_seed: u64,
    outcome: &GameOutcome,
) -> Result<usize, RunnerError> {
    let mut rows_written = 0usize;
    for seat_result in &outcome.seat_results {
        let row = GameLogRow {
            run_id,
            deal_id,
            game_index,
            permutation_index,
            deal_seed: base_seed,
            seat: seat_label(seat_result.seat),
            bot: &seat_result.agent_name,
            role: match seat_result.role {
                Some(Team::Landlord) => "landlord",
                Some(Team::Farmers) => "farmer",
                None => "none",
            },
            bid: outcome.bid,
            bombs: outcome.bombs,
            spring: outcome.spring,
            redeals: outcome.redeals,
            voided: outcome.voided,
            points: seat_result.points,
            won: seat_result.won,
            speed_ms_turn: seat_result.metrics.avg_ms_per_decision,
            decisions: seat_result.metrics.decisions,
        };

        serde_json::to_writer(&mut *writer, &row)?;
        writer.write_all(b"\n")?;
        rows_written += 1;
    }

    Ok(rows_written)
}

fn build_seat_states(
    permutation: &[usize; NUM_PLAYERS],
    agents: &[AgentBlueprint],
) -> Result<Vec<SeatState>, RunnerError> {
    let mut seats = Vec::with_capacity(NUM_PLAYERS);
    for (seat_idx, agent_idx) in permutation.iter().enumerate() {
        let seat = PlayerPosition::from_index(seat_idx).ok_or_else(|| {
            RunnerError::game(format!("invalid seat index generated: {seat_idx}"))
        })?;
        let agent = agents
            .get(*agent_idx)
            .ok_or(RunnerError::InvalidPermutation {
                index: seat_idx,
                agent_index: *agent_idx,
            })?;
        seats.push(SeatState::new(seat, agent));
    }
    Ok(seats)
}

fn seat_label(position: PlayerPosition) -> &'static str {
    match position {
        PlayerPosition::South => "south",
        PlayerPosition::East => "east",
        PlayerPosition::West => "west",
    }
}

struct SeatState {
    seat: PlayerPosition,
    agent_name: String,
    policy: Box<dyn Policy>,
    features: BotFeatures,
    metrics: DecisionMetrics,
}

impl SeatState {
    fn new(seat: PlayerPosition, agent: &AgentBlueprint) -> Self {
        Self {
            seat,
            agent_name: agent.name.clone(),
            policy: agent.spawn_policy(),
            features: agent.options.features,
            metrics: DecisionMetrics::default(),
        }
    }
}

pub struct GameOutcome {
    pub seat_results: Vec<SeatResult>,
    pub landlord: Option<PlayerPosition>,
    pub bid: u8,
    pub bombs: u32,
    pub spring: bool,
    pub redeals: u32,
    /// Nobody bid within the allowed redeals.
    pub voided: bool,
}

pub struct SeatResult {
    pub agent_name: String,
    pub seat: PlayerPosition,
    pub role: Option<Team>,
    pub points: i64,
    pub won: bool,
    pub metrics: DecisionSummary,
}

#[derive(Default)]
struct DecisionMetrics {
    total: Duration,
    decisions: u32,
}

impl DecisionMetrics {
    fn record(&mut self, duration: Duration) -> f64 {
        self.total += duration;
        self.decisions += 1;
        duration.as_secs_f64() * 1000.0
    }

    fn finalize(self) -> DecisionSummary {
        let avg_ms = if self.decisions == 0 {
            0.0
        } else {
            self.total.as_secs_f64() * 1000.0 / f64::from(self.decisions)
        };

        DecisionSummary {
            decisions: self.decisions,
            avg_ms_per_decision: avg_ms,
            total_ms: self.total.as_secs_f64() * 1000.0,
        }
    }
}

#[derive(Clone)]
pub struct DecisionSummary {
    pub decisions: u32,
    pub avg_ms_per_decision: f64,
    pub total_ms: f64,
}

#[derive(Serialize)]
struct GameLogRow<'a> {
    run_id: &'a str,
    deal_id: &'a str,
    game_index: usize,
    permutation_index: usize,
    deal_seed: u64,
    seat: &'static str,
    bot: &'a str,
    role: &'static str,
    bid: u8,
    bombs: u32,
    spring: bool,
    redeals: u32,
    voided: bool,
    points: i64,
    won: bool,
    speed_ms_turn: f64,
    decisions: u32,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("{0}")]
    Agent(#[from] AgentError),
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("game execution failed: {message}")]
    Game { message: String },
    #[error("configuration requires exactly 3 agents but found {found}")]
    SeatCount { found: usize },
    #[error("requested {requested} seat permutations exceeds maximum of {max}")]
    PermutationLimit { requested: usize, max: usize },
    #[error("permutation index {index} references invalid agent index {agent_index}")]
    InvalidPermutation { index: usize, agent_index: usize },
    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}

impl RunnerError {
    fn game(message: String) -> Self {
        RunnerError::Game { message }
    }
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid heuristic parameter for agent '{name}': {message}")]
    InvalidHeuristicParam { name: String, message: String },
}

struct AgentBlueprint {
    name: String,
    options: HeuristicOptions,
}

impl AgentBlueprint {
    fn from_configs(configs: &[AgentConfig]) -> Result<Vec<Self>, AgentError> {
        configs.iter().map(Self::from_config).collect()
    }

    fn from_config(config: &AgentConfig) -> Result<Self, AgentError> {
        Ok(Self {
            name: config.name.clone(),
            options: HeuristicOptions::from_params(&config.name, &config.params)?,
        })
    }

    fn spawn_policy(&self) -> Box<dyn Policy> {
        Box::new(HeuristicPolicy::new(self.options.difficulty))
    }
}

struct HeuristicOptions {
    difficulty: BotDifficulty,
    features: BotFeatures,
}

impl HeuristicOptions {
    fn from_params(name: &str, params: &serde_yaml::Value) -> Result<Self, AgentError> {
        let mut options = Self {
            difficulty: BotDifficulty::Normal,
            features: BotFeatures::default(),
        };
        if params.is_null() {
            return Ok(options);
        }

        let invalid = |message: String| AgentError::InvalidHeuristicParam {
            name: name.to_string(),
            message,
        };

        let mapping = params
            .as_mapping()
            .ok_or_else(|| invalid("expected mapping for heuristic params".to_string()))?;

        for (key, value) in mapping {
            match key.as_str() {
                Some("difficulty") => {
                    let text = value
                        .as_str()
                        .ok_or_else(|| invalid("difficulty must be a string".to_string()))?;
                    options.difficulty = BotDifficulty::parse(text)
                        .ok_or_else(|| invalid(format!("unknown difficulty '{text}'")))?;
                }
                Some("cooperate") => {
                    let enabled = value
                        .as_bool()
                        .ok_or_else(|| invalid("cooperate must be a boolean".to_string()))?;
                    options.features = options.features.with_cooperation(enabled);
                }
                Some(other) => {
                    return Err(invalid(format!("unknown parameter '{other}'")));
                }
                None => return Err(invalid("parameter keys must be strings".to_string())),
            }
        }

        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(entries: &[(&str, serde_yaml::Value)]) -> serde_yaml::Value {
        serde_yaml::Value::Mapping(serde_yaml::Mapping::from_iter(entries.iter().map(
            |(key, value)| (serde_yaml::Value::String((*key).into()), value.clone()),
        )))
    }

    #[test]
    fn heuristic_params_default_to_normal() {
        let params = serde_yaml::Value::Mapping(Default::default());
        let options = HeuristicOptions::from_params("bot", &params).unwrap();
        assert_eq!(options.difficulty, BotDifficulty::Normal);
        assert!(options.features.cooperate_enabled());
    }

    #[test]
    fn heuristic_params_parse_difficulty_and_cooperation() {
        let params = mapping(&[
            ("difficulty", serde_yaml::Value::String("hard".into())),
            ("cooperate", serde_yaml::Value::Bool(false)),
        ]);
        let options = HeuristicOptions::from_params("bot", &params).unwrap();
        assert_eq!(options.difficulty, BotDifficulty::Hard);
        assert!(!options.features.cooperate_enabled());
    }

    #[test]
    fn heuristic_params_reject_unknown_difficulty() {
        let params = mapping(&[("difficulty", serde_yaml::Value::String("expert".into()))]);
        let err = HeuristicOptions::from_params("bot", &params)
            .err()
            .expect("unknown difficulty");
        assert!(err.to_string().contains("expert"));
    }

    #[test]
    fn heuristic_params_reject_unknown_keys() {
        let params = mapping(&[("style", serde_yaml::Value::String("bold".into()))]);
        assert!(HeuristicOptions::from_params("bot", &params).is_err());
    }

    #[test]
    fn seat_states_follow_the_permutation() {
        let configs: Vec<AgentConfig> = ["a", "b", "c"]
            .iter()
            .map(|name| AgentConfig {
                name: (*name).to_string(),
                params: serde_yaml::Value::Null,
            })
            .collect();
        let agents = AgentBlueprint::from_configs(&configs).unwrap();
        let seats = build_seat_states(&[2, 0, 1], &agents).unwrap();
        let names: Vec<_> = seats.iter().map(|s| s.agent_name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
        assert_eq!(seats[0].seat, PlayerPosition::South);
    }

    #[test]
    fn invalid_permutation_is_reported() {
        let configs = vec![AgentConfig {
            name: "solo".to_string(),
            params: serde_yaml::Value::Null,
        }];
        let agents = AgentBlueprint::from_configs(&configs).unwrap();
        assert!(matches!(
            build_seat_states(&[0, 1, 2], &agents),
            Err(RunnerError::InvalidPermutation { index: 1, .. })
        ));
    }
}
