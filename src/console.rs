//! Line-oriented front end for the game. Queues player ops, hands them to the
//! core as events and turns the results into text.

use std::collections::VecDeque;

use game_core::prelude::*;
use game_core::GeocoinCoreSet;

#[derive(Debug)]
pub struct ConsolePlugin;

impl Plugin for ConsolePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingOps>()
            .init_resource::<ConsoleOutput>()
            .add_systems(
                Update,
                sys_send_pending_ops.in_set(GeocoinCoreSet::ProcessInputs),
            )
            .add_systems(PostUpdate, sys_report_results);
    }
}

/// Ops waiting to be sent on the next update.
#[derive(Debug, Default, Deref, DerefMut, Resource)]
pub struct PendingOps(VecDeque<CoinOp>);

/// Lines waiting to be shown to the player.
#[derive(Debug, Default, Deref, DerefMut, Resource)]
pub struct ConsoleOutput(Vec<String>);

fn sys_send_pending_ops(mut pending: ResMut<PendingOps>, mut evw_ops: EventWriter<Op<CoinOp>>) {
    for op in pending.drain(..) {
        evw_ops.send(op.to_op());
    }
}

fn sys_report_results(
    mut evr_results: EventReader<OpResult<CoinOp>>,
    session: Res<Session>,
    mut output: ResMut<ConsoleOutput>,
) {
    let mut reported = false;
    for op_result in evr_results.read() {
        reported = true;
        match op_result.result() {
            Ok(CoinOpOutcome::Moved { cell, spawned }) => {
                output.push(format!("You walk to cell [{cell}]."));
                match spawned.len() {
                    0 => {},
                    1 => output.push("A new cache comes into view.".to_string()),
                    count => output.push(format!("{count} new caches come into view.")),
                }
            },
            Ok(CoinOpOutcome::Took { cell, coin }) => {
                output.push(format!("You take coin {coin} from the cache at [{cell}]."))
            },
            Ok(CoinOpOutcome::Deposited { cell, coin }) => {
                output.push(format!("You leave coin {coin} in the cache at [{cell}]."))
            },
            Err(e) => output.push(format!("Can't do that: {e}.")),
        }
    }
    if reported {
        output.push(session.status_text());
    }
}

pub fn describe_surroundings(session: &GameSession) -> Vec<String> {
    let here = session.player_cell();
    let mut lines = vec![format!("You are at cell [{here}].")];
    let caches = session.visible_caches();
    if caches.is_empty() {
        lines.push("No caches in sight.".to_string());
    }
    for (cell, coins) in caches {
        let marker = if cell == here { " (here)" } else { "" };
        let labels: Vec<String> = coins.iter().map(Coin::to_string).collect();
        lines.push(format!(
            "Cache [{cell}]{marker}: {} coins [{}]",
            coins.len(),
            labels.join(", ")
        ));
    }
    lines
}

pub fn describe_inventory(session: &GameSession) -> Vec<String> {
    let mut lines = vec![session.status_text()];
    lines.extend(
        session
            .inventory()
            .coins()
            .iter()
            .rev()
            .map(|coin| format!("  coin {coin}")),
    );
    lines
}
