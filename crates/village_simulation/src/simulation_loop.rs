//! Simulation loop: Idle → Running → Stopped
//!
//! Тик привязан к кадру (Update schedule), а не к wall-clock таймеру:
//! speed агентов — distance per frame. Stopped — терминальное состояние,
//! после него ни один тик не выполняется.

use bevy::prelude::*;
use bevy::state::state::StateTransition;

use crate::components::Citizen;
use crate::config::VillageConfig;
use crate::logger;
use crate::movement::{advance_citizen, MotionContext, StepOutcome};
use crate::snapshot::VillageSnapshot;
use crate::VillageRng;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SimulationState {
    /// До первого запуска
    #[default]
    Idle,
    /// Тики идут каждый кадр
    Running,
    /// Owning view закрыт, тики отменены
    Stopped,
}

/// Счётчик выполненных тиков
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationTick(pub u64);

/// Счётчики исходов шагов за последний тик (для headless статистики)
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub moved: u32,
    pub arrived: u32,
    pub redirected: u32,
}

/// Система: Idle → Running (из Stopped не перезапускаемся)
pub fn start_simulation(
    state: Res<State<SimulationState>>,
    mut next_state: ResMut<NextState<SimulationState>>,
) {
    if *state.get() == SimulationState::Idle {
        next_state.set(SimulationState::Running);
    }
}

/// Система: отмена loop'а. Идемпотентна: повторный вызов в Stopped ничего не делает
pub fn cancel_simulation(
    state: Res<State<SimulationState>>,
    mut next_state: ResMut<NextState<SimulationState>>,
) {
    if *state.get() != SimulationState::Stopped {
        next_state.set(SimulationState::Stopped);
    }
}

/// Система: teardown — при AppExit безусловно отменяем loop
pub fn stop_on_exit(
    mut exit_events: EventReader<AppExit>,
    state: Res<State<SimulationState>>,
    next_state: ResMut<NextState<SimulationState>>,
) {
    if exit_events.read().last().is_some() {
        cancel_simulation(state, next_state);
    }
}

/// Система: применяет Stopped в том же кадре, что и AppExit
///
/// Runner (winit) завершает App сразу после кадра с AppExit, штатный
/// StateTransition следующего кадра уже не выполнится.
pub fn apply_exit_transition(world: &mut World) {
    if let Err(error) = world.try_run_schedule(StateTransition) {
        logger::log_warning(&format!("State transition on exit failed: {}", error));
    }
}

/// Система: один тик всей деревни
///
/// Агенты обрабатываются в порядке id (RNG общий, так воспроизводимее),
/// затем публикуется свежий snapshot.
pub fn tick_village(
    mut citizens: Query<&mut Citizen>,
    config: Res<VillageConfig>,
    mut rng: ResMut<VillageRng>,
    mut tick: ResMut<SimulationTick>,
    mut stats: ResMut<TickStats>,
    mut snapshot: ResMut<VillageSnapshot>,
) {
    let context = MotionContext::from_config(&config);
    let mut tick_stats = TickStats::default();

    let mut ordered: Vec<_> = citizens.iter_mut().collect();
    ordered.sort_by_key(|citizen| citizen.id);

    for citizen in ordered.iter_mut() {
        let (next, outcome) = advance_citizen(&**citizen, &context, &mut rng.rng);
        match outcome {
            StepOutcome::Moved => tick_stats.moved += 1,
            StepOutcome::Arrived => tick_stats.arrived += 1,
            StepOutcome::Redirected => tick_stats.redirected += 1,
        }
        **citizen = next;
    }

    tick.0 += 1;
    *stats = tick_stats;
    *snapshot = VillageSnapshot::capture(tick.0, ordered.iter().map(|citizen| &**citizen));
}

fn log_running() {
    logger::log_info("Simulation loop: Running");
}

fn log_stopped(tick: Res<SimulationTick>) {
    logger::log_info(&format!("Simulation loop: Stopped after {} ticks", tick.0));
}

/// Plugin loop'а (states + тик + teardown)
///
/// StatesPlugin должен быть уже добавлен (DefaultPlugins или create_headless_app).
pub struct SimulationLoopPlugin;

impl Plugin for SimulationLoopPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<SimulationState>()
            .init_resource::<SimulationTick>()
            .init_resource::<TickStats>()
            .init_resource::<VillageSnapshot>()
            .add_systems(Startup, start_simulation)
            .add_systems(
                OnEnter(SimulationState::Running),
                (crate::spawn::spawn_village, log_running),
            )
            .add_systems(OnEnter(SimulationState::Stopped), log_stopped)
            .add_systems(
                Update,
                tick_village.run_if(in_state(SimulationState::Running)),
            )
            .add_systems(
                Last,
                (stop_on_exit, apply_exit_transition.run_if(on_event::<AppExit>)).chain(),
            );
    }
}
