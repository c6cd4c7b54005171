use super::ancestry::Ancestry;
use super::matcher::Match;

/// True if `other` is a more ancestral version of `m`.
///
/// * both endpoints of `other` lie strictly above the endpoints of `m`, in
///   either pairing;
/// * or the matches share one endpoint and the other endpoint of `other` lies
///   strictly above the other endpoint of `m`.
pub fn dominates(other: &Match, m: &Match, ancestry: &Ancestry) -> bool {
    if other.key() == m.key() {
        return false;
    }

    let above = |x, y| ancestry.is_ancestor(x, y);

    if (above(other.a, m.a) && above(other.b, m.b)) || (above(other.a, m.b) && above(other.b, m.a))
    {
        return true;
    }

    m.nodes().iter().any(|&shared| {
        match (m.partner(shared), other.partner(shared)) {
            (Some(mine), Some(theirs)) => above(theirs, mine),
            _ => false,
        }
    })
}

/// Drop every raw match dominated by another raw match.
///
/// Each match is checked against the whole raw list, so the result does not
/// depend on the order of the input. Survivors keep their discovery order.
/// Domination is a strict order: two matches never remove each other.
pub fn reduce(raw: &[Match], ancestry: &Ancestry) -> Vec<Match> {
    raw.iter()
        .filter(|m| !raw.iter().any(|other| dominates(other, m, ancestry)))
        .copied()
        .collect()
}
