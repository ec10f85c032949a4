//! Tilt Maze headless runner
//!
//! Loads the configured level into a bookkeeping physics world and plays a
//! scripted run: pick up every star, fall into a vortex once, then finish.
//! Contacts are injected on a timer in place of a real physics engine.

use anyhow::{Context, Result};
use glam::Vec3;

use tilt_maze::Settings;
use tilt_maze::consts::*;
use tilt_maze::platform::{JitterTilt, TiltSensor};
use tilt_maze::sim::{
    Contact, EntityId, EntityKind, GameEvent, GamePhase, GameState, HeadlessWorld, TickInput,
    build_scene, resolve_contact, tick,
};

const SETTINGS_FILE: &str = "tilt_maze.json";
/// Seconds between scripted contacts
const CONTACT_INTERVAL: f32 = 1.0;
/// Give up after this long even if the finish was never reached
const MAX_RUN_SECS: f32 = 60.0;

/// Game instance holding all state
struct Game {
    state: GameState,
    world: HeadlessWorld,
    settings: Settings,
    sensor: JitterTilt,
    accumulator: f32,
    /// Subjects still to touch, in order
    script: Vec<EntityId>,
    until_next_contact: f32,
}

impl Game {
    fn new(settings: Settings) -> Result<Self> {
        let level = settings
            .load_level()
            .with_context(|| format!("failed to load level '{}'", settings.level_name))?;
        let mut world = HeadlessWorld::new();
        let state = build_scene(&level, &settings, &mut world);

        let mut script = ids_of(&state, EntityKind::Star);
        script.extend(ids_of(&state, EntityKind::Vortex).first());
        script.extend(ids_of(&state, EntityKind::Finish).first());

        Ok(Self {
            state,
            world,
            settings,
            sensor: JitterTilt::new(0x5EED, Vec3::new(0.15, -0.1, -0.98), 0.05, 0.05),
            accumulator: 0.0,
            script,
            until_next_contact: CONTACT_INTERVAL,
        })
    }

    /// Run simulation ticks for one frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = TickInput {
                tilt: self.sensor.sample(),
            };
            if let Some(event) = tick(
                &mut self.state,
                &mut self.world,
                &input,
                &self.settings,
                SIM_DT,
            ) {
                report(&event);
            }
            self.step_script(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    /// Stand-in for the engine's contact callback
    fn step_script(&mut self, dt: f32) {
        self.until_next_contact -= dt;
        if self.until_next_contact > 0.0 || self.state.is_game_over() {
            return;
        }
        self.until_next_contact = CONTACT_INTERVAL;

        let (Some(player), Some(&subject)) = (self.state.player, self.script.first()) else {
            return;
        };
        self.script.remove(0);
        if !self.world.reports_contact(player, subject) {
            return;
        }
        // Engines report either order; alternate to show it makes no difference
        let contact = if subject % 2 == 0 {
            Contact::new(player, subject)
        } else {
            Contact::new(subject, player)
        };
        if let Some(event) =
            resolve_contact(&mut self.state, &mut self.world, contact, &self.settings)
        {
            report(&event);
        }
    }

    fn finished(&self) -> bool {
        self.state.phase == GamePhase::GameWon
    }
}

fn ids_of(state: &GameState, kind: EntityKind) -> Vec<EntityId> {
    state
        .entities
        .iter()
        .filter(|e| e.kind == kind)
        .map(|e| e.id)
        .collect()
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::StarCollected { score, .. } => log::info!("+1 (score {})", score),
        GameEvent::PlayerDied { score, .. } => log::info!("Swallowed by a vortex (score {})", score),
        GameEvent::PlayerRespawned { .. } => log::info!("Back at the start"),
        GameEvent::LevelWon { score } => log::info!("YOU WIN (score {})", score),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Tilt Maze (headless) starting...");

    let settings = Settings::load(SETTINGS_FILE);
    let mut game = Game::new(settings)?;

    // Frames arrive at a slightly uneven 60 Hz
    let frame = SIM_DT * 1.01;
    let mut elapsed = 0.0;
    while !game.finished() && elapsed < MAX_RUN_SECS {
        game.update(frame);
        elapsed += frame;
    }

    log::info!(
        "Run over after {:.1}s: score {}, {} stars left, gravity {}",
        elapsed,
        game.state.score(),
        game.state.count(EntityKind::Star),
        game.state.gravity
    );
    Ok(())
}
