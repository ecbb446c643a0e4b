use landlord_core::model::player::NUM_PLAYERS;

/// Deterministic seatings of the agents around the table.
///
/// Entry `i` of a seating is the agent index sitting at seat `i`.
pub struct SeatPermutations {
    permutations: Vec<[usize; NUM_PLAYERS]>,
}

impl SeatPermutations {
    pub fn new(count: usize) -> Self {
        let limit = count.min(6);
        let mut permutations = Vec::with_capacity(limit);
        let mut base = [0usize, 1, 2];
        generate(&mut base, 0, limit, &mut permutations);
        Self { permutations }
    }

    pub fn as_slice(&self) -> &[[usize; NUM_PLAYERS]] {
        &self.permutations
    }
}

fn generate(
    data: &mut [usize; NUM_PLAYERS],
    start: usize,
    limit: usize,
    output: &mut Vec<[usize; NUM_PLAYERS]>,
) {
    if output.len() >= limit {
        return;
    }

    if start == data.len() - 1 {
        output.push(*data);
        return;
    }

    for idx in start..data.len() {
        data.swap(start, idx);
        generate(data, start + 1, limit, output);
        data.swap(start, idx);
        if output.len() >= limit {
            break;
        }
    }
}
