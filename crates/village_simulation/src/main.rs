//! Headless симуляция деревни
//!
//! Гоняет тики без рендера и печатает статистику шагов.

use village_simulation::{create_headless_app, logger, SimulationPlugin, SimulationTick, TickStats, VillageSnapshot};

fn main() {
    let seed = 42;
    logger::init_logger();
    logger::log_info(&format!("Starting headless village simulation (seed: {})", seed));

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);

    for frame in 0..1000 {
        app.update();

        if frame % 100 == 0 {
            let world = app.world();
            let tick = world.resource::<SimulationTick>().0;
            let stats = world.resource::<TickStats>();
            let citizens = world.resource::<VillageSnapshot>().citizens.len();
            logger::log_info(&format!(
                "Tick {}: {} citizens (moved {}, arrived {}, redirected {})",
                tick, citizens, stats.moved, stats.arrived, stats.redirected
            ));
        }
    }

    logger::log_info("Simulation complete!");
}
