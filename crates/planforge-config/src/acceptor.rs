use serde::{Deserialize, Serialize};

/// Which candidate moves a local search step may keep.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AcceptorConfig {
    /// Anything at least as good as the last step.
    HillClimbing,
    TabuSearch(TabuSearchConfig),
    LateAcceptance(LateAcceptanceConfig),
    SimulatedAnnealing(SimulatedAnnealingConfig),
    StepCountingHillClimbing(StepCountingHillClimbingConfig),
    GreatDeluge(GreatDelugeConfig),
}

impl AcceptorConfig {
    pub(crate) fn validate(&self) -> Result<(), String> {
        match self {
            Self::HillClimbing => Ok(()),
            Self::TabuSearch(config) => config.validate(),
            Self::LateAcceptance(config) => config.validate(),
            Self::SimulatedAnnealing(config) => config.validate(),
            Self::StepCountingHillClimbing(config) => config.validate(),
            Self::GreatDeluge(config) => config.validate(),
        }
    }
}

/// Tabu lists by family.
///
/// A family is on as soon as either of its sizes is set. Within its
/// first `*_tabu_size` steps a key is forbidden outright; over the next
/// `fading_*_tabu_size` steps it becomes gradually more acceptable.
/// Several families at once combine, and a move must pass every one.
///
/// Entity and value sizes may instead be given as a ratio of the entity
/// or value count. With no family set at all, entity tabu with a ratio
/// of 0.1 is used.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TabuSearchConfig {
    pub entity_tabu_size: Option<usize>,
    pub entity_tabu_ratio: Option<f64>,
    pub fading_entity_tabu_size: Option<usize>,
    pub fading_entity_tabu_ratio: Option<f64>,
    pub value_tabu_size: Option<usize>,
    pub value_tabu_ratio: Option<f64>,
    pub fading_value_tabu_size: Option<usize>,
    pub fading_value_tabu_ratio: Option<f64>,
    pub move_tabu_size: Option<usize>,
    pub fading_move_tabu_size: Option<usize>,
    pub undo_move_tabu_size: Option<usize>,
    pub fading_undo_move_tabu_size: Option<usize>,
    pub solution_tabu_size: Option<usize>,
    pub fading_solution_tabu_size: Option<usize>,

    /// Let a tabu move through when it would beat the best score. Defaults to on.
    pub aspiration_enabled: Option<bool>,
}

const DEFAULT_ENTITY_TABU_RATIO: f64 = 0.1;

/// Length of one band of a tabu family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TabuSize {
    Fixed(usize),
    /// A share of the entity count.
    EntityRatio(f64),
    /// A share of the value count.
    ValueRatio(f64),
}

impl TabuSize {
    fn is_zero(&self) -> bool {
        *self == Self::Fixed(0)
    }
}

/// Both sizes of one tabu family, unset sizes read as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabuWindow {
    pub tabu_size: TabuSize,
    pub fading_tabu_size: TabuSize,
}

impl TabuWindow {
    fn of(size: Option<usize>, fading: Option<usize>) -> Option<Self> {
        Self::with_ratios(size, None, fading, None, TabuSize::EntityRatio)
    }

    fn with_ratios(
        size: Option<usize>,
        ratio: Option<f64>,
        fading: Option<usize>,
        fading_ratio: Option<f64>,
        as_ratio: fn(f64) -> TabuSize,
    ) -> Option<Self> {
        let band = |size: Option<usize>, ratio: Option<f64>| {
            size.map(TabuSize::Fixed).or(ratio.map(as_ratio))
        };
        let tabu_size = band(size, ratio);
        let fading_tabu_size = band(fading, fading_ratio);
        (tabu_size.is_some() || fading_tabu_size.is_some()).then(|| Self {
            tabu_size: tabu_size.unwrap_or(TabuSize::Fixed(0)),
            fading_tabu_size: fading_tabu_size.unwrap_or(TabuSize::Fixed(0)),
        })
    }
}

impl TabuSearchConfig {
    /// Entity tabu, also the fallback when no family is configured.
    pub fn entity_window(&self) -> Option<TabuWindow> {
        let window = TabuWindow::with_ratios(
            self.entity_tabu_size,
            self.entity_tabu_ratio,
            self.fading_entity_tabu_size,
            self.fading_entity_tabu_ratio,
            TabuSize::EntityRatio,
        );
        if window.is_none() && self.is_empty() {
            return Some(TabuWindow {
                tabu_size: TabuSize::EntityRatio(DEFAULT_ENTITY_TABU_RATIO),
                fading_tabu_size: TabuSize::Fixed(0),
            });
        }
        window
    }

    pub fn value_window(&self) -> Option<TabuWindow> {
        TabuWindow::with_ratios(
            self.value_tabu_size,
            self.value_tabu_ratio,
            self.fading_value_tabu_size,
            self.fading_value_tabu_ratio,
            TabuSize::ValueRatio,
        )
    }

    pub fn move_window(&self) -> Option<TabuWindow> {
        TabuWindow::of(self.move_tabu_size, self.fading_move_tabu_size)
    }

    pub fn undo_move_window(&self) -> Option<TabuWindow> {
        TabuWindow::of(self.undo_move_tabu_size, self.fading_undo_move_tabu_size)
    }

    pub fn solution_window(&self) -> Option<TabuWindow> {
        TabuWindow::of(self.solution_tabu_size, self.fading_solution_tabu_size)
    }

    fn is_empty(&self) -> bool {
        [
            self.entity_tabu_size,
            self.fading_entity_tabu_size,
            self.value_tabu_size,
            self.fading_value_tabu_size,
            self.move_tabu_size,
            self.fading_move_tabu_size,
            self.undo_move_tabu_size,
            self.fading_undo_move_tabu_size,
            self.solution_tabu_size,
            self.fading_solution_tabu_size,
        ]
        .iter()
        .all(Option::is_none)
            && [
                self.entity_tabu_ratio,
                self.fading_entity_tabu_ratio,
                self.value_tabu_ratio,
                self.fading_value_tabu_ratio,
            ]
            .iter()
            .all(Option::is_none)
    }

    fn validate(&self) -> Result<(), String> {
        let size_or_ratio = [
            ("entity_tabu", self.entity_tabu_size, self.entity_tabu_ratio),
            (
                "fading_entity_tabu",
                self.fading_entity_tabu_size,
                self.fading_entity_tabu_ratio,
            ),
            ("value_tabu", self.value_tabu_size, self.value_tabu_ratio),
            (
                "fading_value_tabu",
                self.fading_value_tabu_size,
                self.fading_value_tabu_ratio,
            ),
        ];
        for (name, size, ratio) in size_or_ratio {
            if size.is_some() && ratio.is_some() {
                return Err(format!("{name}_size and {name}_ratio are both set"));
            }
            if let Some(ratio) = ratio {
                if !(ratio > 0.0 && ratio < 1.0) {
                    return Err(format!(
                        "{name}_ratio ({ratio}) must be between 0.0 and 1.0"
                    ));
                }
            }
        }

        let families = [
            ("entity", self.entity_window()),
            ("value", self.value_window()),
            ("move", self.move_window()),
            ("undo_move", self.undo_move_window()),
            ("solution", self.solution_window()),
        ];
        for (family, window) in families {
            let Some(window) = window else { continue };
            if window.tabu_size.is_zero() && window.fading_tabu_size.is_zero() {
                return Err(format!(
                    "{family}_tabu_size and fading_{family}_tabu_size are both 0"
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LateAcceptanceConfig {
    /// Length of the score history. Defaults to 400.
    pub late_acceptance_size: Option<usize>,

    /// Also accept anything no worse than the last step.
    pub hill_climbing_enabled: Option<bool>,
}

impl LateAcceptanceConfig {
    fn validate(&self) -> Result<(), String> {
        match self.late_acceptance_size {
            Some(0) => Err("late_acceptance_size must be > 0".to_string()),
            _ => Ok(()),
        }
    }
}

/// Worsening moves pass with a chance that shrinks as the search cools.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulatedAnnealingConfig {
    /// One temperature per score level, highest priority first.
    pub starting_temperature: Vec<f64>,

    /// Multiplicative cooling per step. Defaults to 0.999.
    pub decay_rate: Option<f64>,
}

impl SimulatedAnnealingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.starting_temperature.is_empty() {
            return Err("starting_temperature needs one value per score level".to_string());
        }
        if self.starting_temperature.iter().any(|t| *t < 0.0) {
            return Err("starting_temperature must not be negative".to_string());
        }
        match self.decay_rate {
            Some(rate) if !(rate > 0.0 && rate <= 1.0) => {
                Err(format!("decay_rate ({rate}) must be in (0, 1]"))
            }
            _ => Ok(()),
        }
    }
}

/// Hill climbing against a threshold that is raised every so many steps.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StepCountingHillClimbingConfig {
    /// Counted steps between threshold updates. Defaults to 400.
    pub step_counting_hill_climbing_size: Option<u64>,

    #[serde(default)]
    pub step_counting_hill_climbing_type: StepCountingHillClimbingType,
}

impl StepCountingHillClimbingConfig {
    fn validate(&self) -> Result<(), String> {
        match self.step_counting_hill_climbing_size {
            Some(0) => Err("step_counting_hill_climbing_size must be > 0".to_string()),
            _ => Ok(()),
        }
    }
}

/// Which steps advance the step counting hill climbing counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepCountingHillClimbingType {
    #[default]
    Step,
    EqualOrImprovingStep,
    ImprovingStep,
}

/// Accepts anything above a water level that rises every step.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GreatDelugeConfig {
    /// Share of the starting score's magnitude the level rises per step.
    /// Defaults to 0.001.
    pub water_level_increment_ratio: Option<f64>,
}

impl GreatDelugeConfig {
    fn validate(&self) -> Result<(), String> {
        match self.water_level_increment_ratio {
            Some(ratio) if !(ratio > 0.0 && ratio.is_finite()) => Err(format!(
                "water_level_increment_ratio ({ratio}) must be positive"
            )),
            _ => Ok(()),
        }
    }
}

/// How many accepted moves a step gathers before it picks one.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ForagerConfig {
    pub accepted_count_limit: Option<usize>,
    pub pick_early_type: Option<PickEarlyType>,
}

impl ForagerConfig {
    pub(crate) fn validate(&self) -> Result<(), String> {
        match self.accepted_count_limit {
            Some(0) => Err("accepted_count_limit must be > 0".to_string()),
            _ => Ok(()),
        }
    }
}

/// When a step may stop evaluating before the selector runs dry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PickEarlyType {
    #[default]
    Never,

    /// On the first accepted move that beats the best score.
    FirstBestScoreImproving,

    /// On the first accepted move that beats the last step's score.
    FirstLastStepScoreImproving,
}
