//! Stage lifecycle state machine and pause menu
//!
//! One `Stage` instance covers one life of one stage: geometry is extracted
//! in the constructor and the state machine then walks
//! Intro/Demo -> Play -> {Died, StageComplete} -> terminal or stage
//! replacement. Side effects (music, fades, shakes) are emitted as
//! [`StageEvent`] values for the shell to apply; fade completions come back
//! in through [`Stage::fade_done`] carrying a [`FadeDone`] token, so the
//! multi-fade stage-complete flash is driven by a plain step counter rather
//! than chained callbacks.

use glam::IVec2;

use super::collision::CollisionResolver;
use super::data::StageTable;
use super::geometry::{Light, SpawnSector, StageGeometry, TileLayer, TileSource};
use super::spawn::SpawnAllocator;
use crate::audio::{MusicTrack, SoundEffect};
use crate::consts::*;
use crate::fx::{
    FADE_LEVEL_DARK, FADE_LEVEL_HALF, FADE_LEVEL_NORMAL, FADE_STEP_TICKS_DEFAULT,
    FADE_STEP_TICKS_SLOW, FadeDone, StageEvent,
};
use crate::input::InputSnapshot;
use crate::session::SessionContext;

/// Lifecycle state of a stage. Exactly one is active; transitions happen
/// only through the `player_*` / `is_complete` / `fade_done` methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageState {
    /// Ball dropping in, intro jingle playing
    Intro,
    Play,
    /// Death animation running
    Died,
    /// Attract-mode stage 0, no input accepted
    Demo,
    /// Terminal display state, auto-quits after a tick budget
    GameOver,
    /// All lights hit, flash sequence in flight
    StageComplete,
    /// Scenery stage after the final stage, quits on confirm
    GameComplete,
    /// Weapon animation suspends normal play
    PlayerWeapon,
}

/// Pause-menu entries, in display order
const SEL_RESUME: usize = 0;
const SEL_PALETTE: usize = 1;
const SEL_QUIT: usize = 2;
const SEL_COUNT: usize = 3;

/// What a confirmed pause-menu selection asks the stage to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PauseAction {
    CyclePalette,
    Quit,
}

/// Nested pause state machine. While visible it exclusively consumes input;
/// the shell checks [`PauseMenu::is_visible`] and skips entity updates.
#[derive(Debug, Clone)]
pub struct PauseMenu {
    visible: bool,
    sel_index: usize,
    /// Set once quit is confirmed; suppresses all further menu input
    quitting: bool,
}

impl PauseMenu {
    fn new() -> Self {
        Self {
            visible: false,
            sel_index: 0,
            quitting: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn selection(&self) -> usize {
        self.sel_index
    }

    fn change_selection(&mut self, dir: i32) {
        let count = SEL_COUNT as i32;
        self.sel_index = (self.sel_index as i32 + dir).rem_euclid(count) as usize;
    }

    fn handle(&mut self, input: &InputSnapshot) -> Option<PauseAction> {
        if !self.visible || self.quitting {
            return None;
        }

        if input.start {
            self.visible = false;
            self.sel_index = 0;
        } else if input.confirm {
            match self.sel_index {
                SEL_RESUME => self.visible = false,
                SEL_PALETTE => return Some(PauseAction::CyclePalette),
                SEL_QUIT => {
                    self.quitting = true;
                    return Some(PauseAction::Quit);
                }
                _ => {}
            }
        } else if input.up {
            self.change_selection(-1);
        } else if input.down {
            self.change_selection(1);
        }

        None
    }
}

/// One stage of the game: derived geometry, lifecycle state, pause menu and
/// the event queue the shell drains each tick.
#[derive(Debug, Clone)]
pub struct Stage {
    num: u32,
    state: StageState,
    geometry: StageGeometry,
    resolver: CollisionResolver,
    spawner: SpawnAllocator,
    /// Enemy spawns rolled at construction: (location, spinner kind index)
    spinner_spawns: Vec<(IVec2, usize)>,
    pause_menu: PauseMenu,
    /// Tick counter for the GameOver / GameComplete display budgets
    stage_over_ticks: u32,
    /// Step counter of the stage-complete flash sequence
    next_stage_flash: u32,
    events: Vec<StageEvent>,
}

impl Stage {
    /// Build stage `num` against the shared tilemap. Stage 0 is the demo,
    /// `MAX_STAGE_NUM + 1` the game-complete scenery screen; everything in
    /// between starts in Intro.
    pub fn new(num: u32, tiles: &impl TileSource, table: &StageTable, seed: u64) -> Self {
        let scenery = num == MAX_STAGE_NUM + 1;
        let (layer, origin): (TileLayer, IVec2) = if scenery {
            (1, IVec2::ZERO)
        } else {
            (0, IVec2::new(0, num as i32 * STAGE_BAND_TILES))
        };

        let state = if num == 0 {
            StageState::Demo
        } else if scenery {
            StageState::GameComplete
        } else {
            StageState::Intro
        };

        let geometry = if scenery {
            StageGeometry::walls_only()
        } else {
            StageGeometry::extract(tiles, layer, origin)
        };

        let mut stage = Self {
            num,
            state,
            geometry,
            resolver: CollisionResolver::new(layer, origin),
            spawner: SpawnAllocator::new(seed),
            spinner_spawns: Vec::new(),
            pause_menu: PauseMenu::new(),
            stage_over_ticks: 0,
            next_stage_flash: 0,
            events: Vec::new(),
        };

        if !scenery {
            stage.roll_spinner_spawns(table);
        }

        match stage.state {
            StageState::GameComplete => stage.push(StageEvent::PlayMusic {
                track: MusicTrack::InGame,
                restart: true,
            }),
            StageState::Demo => {}
            _ => stage.push(StageEvent::PlayMusic {
                track: MusicTrack::Start,
                restart: false,
            }),
        }

        log::debug!("Stage {num} created in state {:?}", stage.state);
        stage
    }

    fn push(&mut self, event: StageEvent) {
        self.events.push(event);
    }

    /// Take this tick's pending side effects
    pub fn drain_events(&mut self) -> Vec<StageEvent> {
        std::mem::take(&mut self.events)
    }

    fn roll_spinner_spawns(&mut self, table: &StageTable) {
        let quotas = table.spinner_quotas(self.num);
        for (kind, &qty) in quotas.iter().enumerate() {
            for _ in 0..qty {
                if let Some(loc) = self.spawner.random_location(&self.geometry, SpawnSector::Any) {
                    self.spinner_spawns.push((loc, kind));
                }
            }
        }
    }

    // === Accessors ===

    pub fn num(&self) -> u32 {
        self.num
    }

    pub fn state(&self) -> StageState {
        self.state
    }

    pub fn geometry(&self) -> &StageGeometry {
        &self.geometry
    }

    /// Lights are the one piece of geometry mutated after construction: the
    /// external ball logic marks them hit.
    pub fn lights_mut(&mut self) -> &mut [Light] {
        &mut self.geometry.lights
    }

    pub fn pause_menu(&self) -> &PauseMenu {
        &self.pause_menu
    }

    /// Spinner spawns rolled at construction for the external entity layer
    pub fn spinner_spawns(&self) -> &[(IVec2, usize)] {
        &self.spinner_spawns
    }

    // === Collision and spawn queries ===

    /// Slope angle at a screen pixel, if any. See [`CollisionResolver`].
    pub fn angle_at(&self, tiles: &impl TileSource, x: f32, y: f32) -> Option<u16> {
        self.resolver.angle_at(tiles, x, y)
    }

    /// Draw a random spawn location; `None` if the sector has no candidates
    pub fn random_spawn(&mut self, sector: SpawnSector) -> Option<IVec2> {
        self.spawner.random_location(&self.geometry, sector)
    }

    // === Transitions ===

    /// Intro drop finished; gameplay starts
    pub fn player_intro_done(&mut self) {
        if self.state != StageState::PlayerWeapon {
            self.push(StageEvent::PlayMusic {
                track: MusicTrack::InGame,
                restart: true,
            });
        }
        self.state = StageState::Play;
    }

    /// Player fired their screen-clearing weapon
    pub fn player_used_weapon(&mut self) {
        self.push(StageEvent::PlaySound(SoundEffect::WeaponUsed));
        self.state = StageState::PlayerWeapon;
    }

    /// Player was struck by an enemy
    pub fn player_hit(&mut self) {
        self.state = StageState::Died;
        self.push(StageEvent::PlayMusic {
            track: MusicTrack::Death,
            restart: false,
        });
    }

    /// Death animation finished: retry if lives remain, else game over
    pub fn player_death_anim_done(&mut self, session: &mut SessionContext) {
        if session.lives() >= 1 {
            session.decrement_lives();
            self.push(StageEvent::Fade {
                step_ticks: FADE_STEP_TICKS_DEFAULT,
                level: FADE_LEVEL_DARK,
                then: FadeDone::RestartStage,
            });
        } else {
            self.state = StageState::GameOver;
            self.push(StageEvent::PlayMusic {
                track: MusicTrack::GameOver,
                restart: false,
            });
        }
    }

    /// Completion check with a side effect: when every light is hit this
    /// starts the stage-complete sequence. The update loop must gate the
    /// call on the Play state so the sequence cannot re-trigger.
    pub fn is_complete(&mut self) -> bool {
        if !self.geometry.all_lights_hit() {
            return false;
        }

        self.push(StageEvent::PlayMusic {
            track: MusicTrack::StageComplete,
            restart: false,
        });
        self.state = StageState::StageComplete;
        self.push(StageEvent::Fade {
            step_ticks: FADE_STEP_TICKS_DEFAULT,
            level: FADE_LEVEL_NORMAL,
            then: FadeDone::NextStageFlash,
        });

        true
    }

    /// A fade carrying a stage-owned token finished. Tokens the shell
    /// resolves itself (stage replacement, quit) never reach this method.
    pub fn fade_done(&mut self, done: FadeDone, session: &mut SessionContext) {
        match done {
            FadeDone::NextStageFlash => self.advance_flash(session),
            other => log::debug!("fade token {other:?} is shell-resolved, ignoring"),
        }
    }

    /// One step of the stage-complete flash: two slow palette pulses, then
    /// the final fade-out that resolves to the next stage (with a bonus
    /// life) or, after the last stage, to the game-complete screen.
    fn advance_flash(&mut self, session: &mut SessionContext) {
        match self.next_stage_flash {
            0 => self.push(StageEvent::Fade {
                step_ticks: FADE_STEP_TICKS_SLOW,
                level: FADE_LEVEL_HALF,
                then: FadeDone::NextStageFlash,
            }),
            1 => self.push(StageEvent::Fade {
                step_ticks: FADE_STEP_TICKS_SLOW,
                level: FADE_LEVEL_NORMAL,
                then: FadeDone::NextStageFlash,
            }),
            _ => {
                if self.num == MAX_STAGE_NUM {
                    self.push(StageEvent::Fade {
                        step_ticks: FADE_STEP_TICKS_SLOW,
                        level: FADE_LEVEL_DARK,
                        then: FadeDone::GameComplete,
                    });
                } else {
                    session.add_lives(1);
                    self.push(StageEvent::Fade {
                        step_ticks: FADE_STEP_TICKS_SLOW,
                        level: FADE_LEVEL_DARK,
                        then: FadeDone::NextStage,
                    });
                }
            }
        }
        self.next_stage_flash += 1;
    }

    /// Fade out and return to the main menu. The newest fade request wins if
    /// another sequence is still in flight.
    pub fn quit(&mut self) {
        self.push(StageEvent::Fade {
            step_ticks: FADE_STEP_TICKS_DEFAULT,
            level: FADE_LEVEL_DARK,
            then: FadeDone::QuitToMenu,
        });
    }

    /// Ball bounced off a non-slope solid rect
    pub fn player_hit_solid(&mut self) {
        self.push(StageEvent::PlaySound(SoundEffect::WallHit));
        self.push(StageEvent::Shake {
            duration: 5,
            magnitude: 1,
            queue: false,
        });
    }

    /// Restart the in-game loop after a palette cycle; no-op outside Play
    pub fn restart_music(&mut self) {
        if self.state == StageState::Play {
            self.push(StageEvent::PlayMusic {
                track: MusicTrack::InGame,
                restart: true,
            });
        }
    }

    /// Per-tick stage bookkeeping: pause-menu input, menu opening, and the
    /// GameOver / GameComplete display budgets. Player, spinner and light
    /// entities are updated by the shell around this call; the demo stage
    /// accepts no input at all.
    pub fn update(&mut self, input: &InputSnapshot) {
        if self.num == 0 {
            return;
        }

        if self.pause_menu.visible {
            if let Some(action) = self.pause_menu.handle(input) {
                match action {
                    PauseAction::CyclePalette => self.push(StageEvent::Fade {
                        step_ticks: FADE_STEP_TICKS_DEFAULT,
                        level: FADE_LEVEL_DARK,
                        then: FadeDone::CyclePalette,
                    }),
                    PauseAction::Quit => self.quit(),
                }
            }
        } else if input.start
            && matches!(self.state, StageState::Play | StageState::PlayerWeapon)
        {
            self.pause_menu.visible = true;
        }

        match self.state {
            StageState::GameOver => {
                self.stage_over_ticks += 1;
                if self.stage_over_ticks == GAME_OVER_TICKS {
                    self.quit();
                }
            }
            StageState::GameComplete => {
                self.stage_over_ticks += 1;
                if self.stage_over_ticks >= GAME_COMPLETE_TICKS && input.confirm {
                    self.quit();
                }
            }
            _ => {}
        }
    }
}
