//! Mission generation service: one resolved seed drives a level layout and a
//! guard encounter set, each on its own random stream.

use serde::{Deserialize, Serialize};

use crate::config::GenerationConfig;
use crate::encounters::{EncounterGenerator, GuardEncounterSet};
use crate::mapgen::{LayoutGenerator, LevelLayout};
use crate::seed::{SeedChoice, resolve_seed};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedMission {
    /// Seed actually used, including one drawn for the random-seed sentinel.
    pub seed: u64,
    pub layout: LevelLayout,
    pub encounters: GuardEncounterSet,
}

pub struct MissionGenerator {
    config: GenerationConfig,
    last: Option<GeneratedMission>,
}

impl MissionGenerator {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config, last: None }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn last(&self) -> Option<&GeneratedMission> {
        self.last.as_ref()
    }

    pub fn clear(&mut self) {
        self.last = None;
    }

    /// Generates with the seed stored in the configuration.
    pub fn generate_configured(&mut self) -> &GeneratedMission {
        self.generate(self.config.seed)
    }

    /// Builds a fresh mission and replaces the previous one as a whole.
    pub fn generate(&mut self, requested_seed: i64) -> &GeneratedMission {
        let choice = resolve_seed(requested_seed);
        let seed = choice.value();

        let layout = LayoutGenerator::new(self.config.level.clone()).generate(seed);
        let encounters = EncounterGenerator::new(self.config.encounters.clone()).generate(seed);

        log::info!(
            "mission seed={seed}{} layout={:016x} encounters={:016x} rooms={} guards={}",
            if matches!(choice, SeedChoice::Generated(_)) { " (generated)" } else { "" },
            layout.fingerprint(),
            encounters.fingerprint(),
            layout.rooms.len(),
            encounters.guards.len()
        );

        self.last.insert(GeneratedMission { seed, layout, encounters })
    }
}
