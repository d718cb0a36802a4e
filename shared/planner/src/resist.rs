use crate::geometry::angle_diff;
use crate::search::{BearingCandidate, SearchContext};

/// Previous and winning bearings closer than this are the same bearing.
const SAME_BEARING: f64 = 1e-9;

/// The bearing to steer this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decision {
    pub candidate: BearingCandidate,
    /// The previous bearing was kept over the search winner.
    pub resisted: bool,
}

/// Keeps the previous bearing when it still clears and is not much further
/// off the direct path than the winner.
///
/// "Not much further" means its deviation exceeds the winner's by at most
/// the configured resist margin. This damps left/right flapping when an
/// obstacle boundary sits between two fan steps.
pub fn resist_bearing_change(
    ctx: &SearchContext,
    previous: Option<f64>,
    winner: BearingCandidate,
) -> Decision {
    let take_winner = Decision {
        candidate: winner,
        resisted: false,
    };
    let previous = match previous {
        Some(previous) => previous,
        None => return take_winner,
    };
    if angle_diff(previous, winner.bearing).abs() < SAME_BEARING {
        return take_winner;
    }

    let held = ctx.evaluate(previous);
    if !held.is_valid() {
        log::trace!(
            "previous bearing {:.1} no longer clear",
            previous.to_degrees()
        );
        return take_winner;
    }

    let extra = held.deviation() - winner.deviation();
    if extra <= ctx.config.resist_margin() {
        log::trace!(
            "holding bearing {:.1} over {:.1} ({:.1} degrees further off)",
            previous.to_degrees(),
            winner.bearing.to_degrees(),
            extra.to_degrees()
        );
        Decision {
            candidate: held,
            resisted: true,
        }
    } else {
        take_winner
    }
}
