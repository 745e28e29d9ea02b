//! Display numbering of transient channels.
//!
//! Numbers are always recomputed from the names currently on the platform. A channel
//! whose name doesn't match the kind's template (for example a private channel its
//! owner renamed) neither holds a number nor gets renumbered.

use std::collections::HashSet;

use serenity::all::ChannelId;

use crate::model::voice::{NameFormat, VoiceChannelSnapshot};

/// Smallest positive number not used by any of `names`.
///
/// # Arguments
/// - `format` - Template the numbered names follow
/// - `names` - Names of every channel in the target category
pub fn next_free_number<'n>(format: &NameFormat, names: impl IntoIterator<Item = &'n str>) -> u32 {
    let used: HashSet<u32> = names
        .into_iter()
        .filter_map(|name| format.parse(name))
        .collect();

    let mut number = 1;
    while used.contains(&number) {
        number += 1;
    }
    number
}

/// Renames needed to compact occupied channels into the lowest free numbers.
///
/// Empty channels still carry their number until they are deleted, so the numbers
/// they hold are reserved and occupied channels take the smallest numbers left over.
/// Occupied channels are ordered by their current number (ties broken by id) so
/// members keep their relative order. Channels outside the naming scheme are left
/// alone, and channels already carrying their target name produce no rename.
///
/// # Returns
/// - Pairs of channel and new name, in target order
pub fn plan_renumber(
    format: &NameFormat,
    channels: &[VoiceChannelSnapshot],
) -> Vec<(ChannelId, String)> {
    let reserved: HashSet<u32> = channels
        .iter()
        .filter(|channel| channel.occupants == 0)
        .filter_map(|channel| format.parse(&channel.name))
        .collect();

    let mut numbered: Vec<(u32, ChannelId, &str)> = channels
        .iter()
        .filter(|channel| channel.occupants > 0)
        .filter_map(|channel| {
            format
                .parse(&channel.name)
                .map(|number| (number, channel.channel_id, channel.name.as_str()))
        })
        .collect();
    numbered.sort();

    let targets = (1u32..).filter(|number| !reserved.contains(number));

    numbered
        .into_iter()
        .zip(targets)
        .filter_map(|((_, channel_id, current), target)| {
            let name = format.render(target);
            (name != current).then_some((channel_id, name))
        })
        .collect()
}
