use serde::{Deserialize, Serialize};

/// Which of the two teams an event or counter belongs to.
///
/// The first team of a fixture is always `Home`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub const BOTH: [TeamSide; 2] = [TeamSide::Home, TeamSide::Away];

    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }
}

/// A value held once per team.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PerSide<T> {
    pub home: T,
    pub away: T,
}

impl<T> PerSide<T> {
    pub fn new(home: T, away: T) -> Self {
        Self { home, away }
    }

    #[inline]
    pub fn get(&self, side: TeamSide) -> &T {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, side: TeamSide) -> &mut T {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    /// Mutable access to `side` and its opponent at the same time.
    pub fn pair_mut(&mut self, side: TeamSide) -> (&mut T, &mut T) {
        match side {
            TeamSide::Home => (&mut self.home, &mut self.away),
            TeamSide::Away => (&mut self.away, &mut self.home),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TeamSide, &T)> {
        [(TeamSide::Home, &self.home), (TeamSide::Away, &self.away)].into_iter()
    }

    pub fn map<U>(&self, mut f: impl FnMut(TeamSide, &T) -> U) -> PerSide<U> {
        PerSide { home: f(TeamSide::Home, &self.home), away: f(TeamSide::Away, &self.away) }
    }
}
