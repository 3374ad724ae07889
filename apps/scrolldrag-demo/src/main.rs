//! Replays a fixed script of touches against a 30-item row on the system
//! clock and logs what the renderer would draw.

mod script;

use anyhow::{bail, Context};
use scrolldrag_core::{DefaultScheduler, Runtime, SystemClock, DEFAULT_MAX_PUMP_TICKS};
use scrolldrag_ui::{EngineConfig, ItemRow, LogHaptics};
use script::{Gesture, GestureEnd, Player};
use std::rc::Rc;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = EngineConfig::default();
    let runtime = Runtime::new(Arc::new(DefaultScheduler), Arc::new(SystemClock::new()));
    let mut row = ItemRow::new(runtime.handle(), config, Rc::new(LogHaptics));
    for item in row.items().ids() {
        row.set_tap_action(item, move || log::info!("item {} tapped", item));
    }

    let script = [
        Gesture::on_item(5).hold_ms(150).drag(40.0, -10.0),
        Gesture::on_item(5).hold_ms(150).drag(10.0, 5.0),
        Gesture::on_item(5).hold_ms(50),
        Gesture::on_item(5)
            .hold_ms(120)
            .drag(100.0, 0.0)
            .ending(GestureEnd::Cancel),
        Gesture::on_item(2).hold_ms(30),
        Gesture::on_item(1).drag(-120.0, 0.0),
    ];

    let mut player = Player::new(&runtime);
    for (index, gesture) in script.iter().enumerate() {
        log::info!("gesture {}: {:?}", index + 1, gesture);
        player
            .play(&mut row, gesture)
            .with_context(|| format!("replaying gesture {}", index + 1))?;
        runtime
            .pump_until_idle(DEFAULT_MAX_PUMP_TICKS)
            .context("settling after gesture")?;
    }

    if row.render_states().any(|(_, state)| state.pressing) {
        bail!("an item is still marked as pressed after every touch ended");
    }

    log::info!("scroll position: {:.1}", row.scroll_state().value());
    for (item, state) in row.render_states() {
        let offset = state.displayed_offset;
        if !offset.is_zero() {
            log::info!("item {}: offset ({:.1}, {:.1})", item, offset.x, offset.y);
        }
    }
    Ok(())
}
