//! Headless combo tracking example.
//!
//! Plays back a scripted stream of key states for one player and prints
//! every triggered action.
//!
//! Run with: `cargo run --example headless`

use bevy::prelude::*;
use bevy_input_sequence::prelude::*;

const PLAYER: PlayerId = PlayerId::from_u128(0x5eed);

/// Scripted key states, one per tick.
#[derive(Resource)]
struct Script {
    ticks: Vec<InputSnapshot>,
    next: usize,
}

impl Script {
    fn new(presses: &[InputSymbol]) -> Self {
        // Press, release, press, release...
        let ticks = presses
            .iter()
            .flat_map(|&symbol| [InputSnapshot::held([symbol]), InputSnapshot::RELEASED])
            .collect();
        Self { ticks, next: 0 }
    }
}

fn main() {
    use InputSymbol::*;

    App::new()
        .add_plugins(MinimalPlugins)
        .add_plugins(InputSequencePlugin::in_schedule(Update))
        .insert_resource(
            SequenceConfig::new()
                .on_update("show_combo")
                .on_complete("combo_done")
                .route("SHIFT + W + W + S", "dash_back")
                .route("shift>space>space>space", "triple_jump"),
        )
        .insert_resource(Script::new(&[
            Forward, Sneak, Forward, Forward, Backward, Sneak, Jump, Jump, Jump,
        ]))
        .add_systems(Startup, join)
        .add_systems(Update, play_script.before(SequenceSystems::Config))
        .add_systems(PostUpdate, print_triggers)
        .run();
}

fn join(mut enters: MessageWriter<AudienceEnter>) {
    println!("Player {} joined", PLAYER);
    enters.write(AudienceEnter { player: PLAYER });
}

fn play_script(
    mut script: ResMut<Script>,
    mut samples: MessageWriter<PlayerInputSample>,
    mut exit: MessageWriter<AppExit>,
) {
    let Some(&input) = script.ticks.get(script.next) else {
        exit.write(AppExit::Success);
        return;
    };
    script.next += 1;
    samples.write(PlayerInputSample::new(PLAYER, input));
}

fn print_triggers(mut triggers: MessageReader<TriggerAction>, display: SequenceDisplay) {
    for trigger in triggers.read() {
        let cause = match &trigger.cause {
            TriggerCause::SequenceUpdated { .. } => "update",
            TriggerCause::SequenceCompleted { .. } => "complete",
            TriggerCause::ComboRoute { .. } => "route",
            TriggerCause::InputEvent(_) => "input",
        };
        println!(
            "[tick {}] {} ({}) | {}",
            trigger.tick,
            trigger.action,
            cause,
            display.current(trigger.player, DisplayStyle::Full)
        );
    }
}
