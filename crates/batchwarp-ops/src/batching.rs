//! Channel-group decomposition for planar layouts.
//!
//! Planar backends only expose 1-, 3- and 4-plane entry points, so a planar
//! image with an arbitrary channel count is warped as a sequence of channel
//! groups. Fewer, larger calls are cheaper, hence the greedy decomposition.

/// Decomposes a planar channel count into backend-supported group sizes.
///
/// Greedy largest-first cover over {4, 3, 1}: all the 4s that fit, one 3 if
/// exactly 3 planes remain, then single planes. A group of 2 is never
/// produced; two-plane entry points do not exist in the backend menu.
///
/// The decomposition is total and deterministic, and the emitted sizes sum
/// to the input count.
///
/// # Examples
///
/// ```
/// use batchwarp_ops::batching::plane_groups;
///
/// assert_eq!(plane_groups(7), vec![4, 3]);
/// assert_eq!(plane_groups(11), vec![4, 4, 3]);
/// assert_eq!(plane_groups(9), vec![4, 4, 1]);
/// assert_eq!(plane_groups(2), vec![1, 1]);
/// ```
pub fn plane_groups(channels: usize) -> Vec<usize> {
    let mut groups = Vec::with_capacity(channels / 4 + 2);
    let mut remain = channels;
    while remain >= 4 {
        groups.push(4);
        remain -= 4;
    }
    if remain == 3 {
        groups.push(3);
        remain = 0;
    }
    while remain >= 1 {
        groups.push(1);
        remain -= 1;
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_match_known_decompositions() {
        assert_eq!(plane_groups(0), Vec::<usize>::new());
        assert_eq!(plane_groups(1), vec![1]);
        assert_eq!(plane_groups(2), vec![1, 1]);
        assert_eq!(plane_groups(3), vec![3]);
        assert_eq!(plane_groups(4), vec![4]);
        assert_eq!(plane_groups(5), vec![4, 1]);
        assert_eq!(plane_groups(6), vec![4, 1, 1]);
        assert_eq!(plane_groups(7), vec![4, 3]);
        assert_eq!(plane_groups(9), vec![4, 4, 1]);
        assert_eq!(plane_groups(11), vec![4, 4, 3]);
    }

    #[test]
    fn groups_cover_the_channel_count() {
        for c in 0..256 {
            let groups = plane_groups(c);
            assert_eq!(groups.iter().sum::<usize>(), c, "sum for {c}");
            assert!(groups.iter().all(|&g| matches!(g, 4 | 3 | 1)), "menu for {c}");
            assert!(groups.iter().filter(|&&g| g == 3).count() <= 1, "one 3 for {c}");
        }
    }

    #[test]
    fn groups_are_deterministic() {
        for c in [0, 1, 5, 7, 42, 511] {
            assert_eq!(plane_groups(c), plane_groups(c));
        }
    }
}
