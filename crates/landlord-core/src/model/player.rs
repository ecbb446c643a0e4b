use core::fmt;
use serde::{Deserialize, Serialize};

pub const NUM_PLAYERS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlayerPosition {
    South = 0,
    East = 1,
    West = 2,
}

impl PlayerPosition {
    pub const LOOP: [PlayerPosition; NUM_PLAYERS] = [
        PlayerPosition::South,
        PlayerPosition::East,
        PlayerPosition::West,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PlayerPosition::South),
            1 => Some(PlayerPosition::East),
            2 => Some(PlayerPosition::West),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> PlayerPosition {
        match self {
            PlayerPosition::South => PlayerPosition::East,
            PlayerPosition::East => PlayerPosition::West,
            PlayerPosition::West => PlayerPosition::South,
        }
    }

    pub const fn previous(self) -> PlayerPosition {
        match self {
            PlayerPosition::South => PlayerPosition::West,
            PlayerPosition::East => PlayerPosition::South,
            PlayerPosition::West => PlayerPosition::East,
        }
    }
}

impl fmt::Display for PlayerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlayerPosition::South => "South",
            PlayerPosition::East => "East",
            PlayerPosition::West => "West",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Landlord,
    Farmers,
}

impl Team {
    pub fn of(seat: PlayerPosition, landlord: PlayerPosition) -> Self {
        if seat == landlord {
            Team::Landlord
        } else {
            Team::Farmers
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Landlord => f.write_str("landlord"),
            Team::Farmers => f.write_str("farmers"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PlayerPosition, Team};

    #[test]
    fn next_wraps_around() {
        assert_eq!(PlayerPosition::West.next(), PlayerPosition::South);
    }

    #[test]
    fn previous_wraps_around() {
        assert_eq!(PlayerPosition::South.previous(), PlayerPosition::West);
    }

    #[test]
    fn index_roundtrip() {
        for (i, seat) in PlayerPosition::LOOP.iter().enumerate() {
            assert_eq!(PlayerPosition::from_index(i), Some(*seat));
            assert_eq!(seat.index(), i);
        }
    }

    #[test]
    fn team_splits_landlord_from_farmers() {
        let landlord = PlayerPosition::East;
        assert_eq!(Team::of(PlayerPosition::East, landlord), Team::Landlord);
        assert_eq!(Team::of(PlayerPosition::West, landlord), Team::Farmers);
        assert_eq!(Team::of(PlayerPosition::South, landlord), Team::Farmers);
    }
}
