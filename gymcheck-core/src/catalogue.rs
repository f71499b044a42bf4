//! The fixed catalogue of environment ids under test.
//!
//! Gymnasium ids as listed on gymnasium.farama.org (Nov 2024) and
//! Gymnasium-Robotics ids as listed on robotics.farama.org (Feb 2024).

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::registry::Extension;

pub const GYMNASIUM: &str = "Gymnasium";
pub const GYMNASIUM_ROBOTICS: &str = "Gymnasium-Robotics";

const CLASSIC_CONTROL: &[&str] = &[
    "Acrobot-v1",
    "CartPole-v1",
    "MountainCarContinuous-v0",
    "MountainCar-v0",
    "Pendulum-v1",
];

const BOX2D: &[&str] = &["BipedalWalker-v3", "CarRacing-v3", "LunarLander-v3"];

const TOY_TEXT: &[&str] = &["Blackjack-v1", "Taxi-v3", "CliffWalking-v0", "FrozenLake-v1"];

const MUJOCO: &[&str] = &[
    "Ant", "HalfCheetah", "Hopper", "Humanoid", "HumanoidStandup", "InvertedDoublePendulum",
    "InvertedPendulum", "Pusher", "Reacher", "Swimmer", "Walker2d",
];

#[rustfmt::skip]
const ATARI: &[&str] = &[
    "Adventure", "AirRaid", "Alien", "Amidar", "Assault", "Asterix", "Asteroids", "Atlantis", "Atlantis2", "Backgammon",
    "BankHeist", "BasicMath", "BattleZone", "BeamRider", "Berzerk", "Blackjack", "Bowling", "Boxing", "Breakout", "Carnival",
    "Casino", "Centipede", "ChopperCommand", "CrazyClimber", "Crossbow", "Darkchambers", "Defender", "DemonAttack", "DonkeyKong", "DoubleDunk",
    "Earthworld", "ElevatorAction", "Enduro", "Entombed", "Et", "FishingDerby", "FlagCapture", "Freeway", "Frogger", "Frostbite",
    "Galaxian", "Gopher", "Gravitar", "Hangman", "HauntedHouse", "Hero", "HumanCannonball", "IceHockey", "Jamesbond", "JourneyEscape",
    "Kaboom", "Kangaroo", "KeystoneKapers", "KingKong", "Klax", "Koolaid", "Krull", "KungFuMaster", "LaserGates", "LostLuggage",
    "MarioBros", "MiniatureGolf", "MontezumaRevenge", "MrDo", "MsPacman", "NameThisGame", "Othello", "Pacman", "Phoenix", "Pitfall",
    "Pitfall2", "Pong", "Pooyan", "PrivateEye", "Qbert", "Riverraid", "RoadRunner", "Robotank", "Seaquest", "SirLancelot",
    "Skiing", "Solaris", "SpaceInvaders", "SpaceWar", "StarGunner", "Superman", "Surround", "Tennis", "Tetris", "TicTacToe3D",
    "TimePilot", "Trondead", "Turmoil", "Tutankham", "UpNDown", "Venture", "VideoCheckers", "VideoChess", "VideoCube", "VideoPinball",
    "WizardOfWor", "WordZapper", "YarsRevenge", "Zaxxon",
];

const FETCH: &[&str] = &["FetchPickAndPlace", "FetchPush", "FetchReach", "FetchSlide"];

const SHADOW_DEXTEROUS_HAND: &[&str] = &[
    "HandManipulateBlock",
    "HandManipulateBlock_ContinuousTouchSensors",
    "HandManipulateEgg",
    "HandManipulateEgg_ContinuousTouchSensors",
    "HandManipulatePen",
    "HandManipulatePen_ContinuousTouchSensors",
];

const MAZE: &[&str] = &[
    "AntMaze_UMaze-v5",
    "AntMaze_BigMaze_DG-v5",
    "AntMaze_HardestMaze_DGR-v5",
    "PointMaze_UMaze-v3",
    "PointMaze_Medium_Diverse_G-v3",
    "PointMaze_Large_Diverse_GR-v3",
];

const ADROIT_HAND: &[&str] = &[
    "AdroitHandDoor-v1",
    "AdroitHandHammer-v1",
    "AdroitHandPen-v1",
    "AdroitHandRelocate-v1",
];

const FRANKA_KITCHEN: &[&str] = &["FrankaKitchen-v1"];

/// Subdomain name → ordered ids.
pub type Subdomains = IndexMap<String, Vec<String>>;

/// Domain → subdomain → ordered list of environment ids, iterated in
/// insertion order. Ids are not validated; duplicates pass through.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalogue {
    domains: IndexMap<String, Subdomains>,
    arcade: HashSet<String>,
    robotics: HashSet<String>,
}

fn owned(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

fn versioned(names: &[&str], prefix: &str, suffix: &str) -> Vec<String> {
    names.iter().map(|name| format!("{prefix}{name}{suffix}")).collect()
}

impl Catalogue {
    /// The Gymnasium and Gymnasium-Robotics catalogue.
    pub fn standard() -> Self {
        let atari = versioned(ATARI, "ALE/", "-v5");

        let gymnasium: Subdomains = [
            ("Classical Control", owned(CLASSIC_CONTROL)),
            ("Box2D", owned(BOX2D)),
            ("Toy Text", owned(TOY_TEXT)),
            ("MuJoCo", versioned(MUJOCO, "", "-v5")),
            ("Atari", atari.clone()),
        ]
        .into_iter()
        .map(|(name, ids)| (name.to_string(), ids))
        .collect();

        let mut hand = versioned(SHADOW_DEXTEROUS_HAND, "", "-v1");
        hand.push("HandReach-v2".to_string());

        let robotics: Subdomains = [
            ("Fetch", versioned(FETCH, "", "-v3")),
            ("Shadow Dexterous Hand", hand),
            ("Maze", owned(MAZE)),
            ("Adroit Hand", owned(ADROIT_HAND)),
            ("Franka Kitchen", owned(FRANKA_KITCHEN)),
        ]
        .into_iter()
        .map(|(name, ids)| (name.to_string(), ids))
        .collect();

        let robotics_ids = robotics.values().flatten().cloned().collect();

        let mut domains = IndexMap::new();
        domains.insert(GYMNASIUM.to_string(), gymnasium);
        domains.insert(GYMNASIUM_ROBOTICS.to_string(), robotics);

        Self {
            domains,
            arcade: atari.into_iter().collect(),
            robotics: robotics_ids,
        }
    }

    /// Builds a catalogue from arbitrary data. The special subsets are taken
    /// as given rather than derived.
    pub fn from_parts(
        domains: IndexMap<String, Subdomains>,
        arcade: impl IntoIterator<Item = String>,
        robotics: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            domains,
            arcade: arcade.into_iter().collect(),
            robotics: robotics.into_iter().collect(),
        }
    }

    pub fn domains(&self) -> &IndexMap<String, Subdomains> {
        &self.domains
    }

    /// Every (domain, subdomain, id) triple in catalogue order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.domains.iter().flat_map(|(domain, subdomains)| {
            subdomains.iter().flat_map(move |(subdomain, ids)| {
                ids.iter().map(move |id| (domain.as_str(), subdomain.as_str(), id.as_str()))
            })
        })
    }

    pub fn len(&self) -> usize {
        self.domains.values().flat_map(|s| s.values()).map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn arcade_ids(&self) -> &HashSet<String> {
        &self.arcade
    }

    pub fn robotics_ids(&self) -> &HashSet<String> {
        &self.robotics
    }

    /// Extensions that must be registered before `id` can be made, arcade
    /// before robotics.
    pub fn extensions_for(&self, id: &str) -> Vec<Extension> {
        let mut needed = Vec::new();
        if self.arcade.contains(id) {
            needed.push(Extension::Arcade);
        }
        if self.robotics.contains(id) {
            needed.push(Extension::Robotics);
        }
        needed
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(catalogue: &Catalogue, domain: &str) -> Vec<(String, usize)> {
        catalogue.domains()[domain]
            .iter()
            .map(|(name, ids)| (name.clone(), ids.len()))
            .collect()
    }

    #[test]
    fn standard_catalogue_layout() {
        let catalogue = Catalogue::standard();
        let domains: Vec<_> = catalogue.domains().keys().cloned().collect();
        assert_eq!(domains, vec![GYMNASIUM, GYMNASIUM_ROBOTICS]);

        assert_eq!(
            sizes(&catalogue, GYMNASIUM),
            vec![
                ("Classical Control".to_string(), 5),
                ("Box2D".to_string(), 3),
                ("Toy Text".to_string(), 4),
                ("MuJoCo".to_string(), 11),
                ("Atari".to_string(), 104),
            ]
        );
        assert_eq!(
            sizes(&catalogue, GYMNASIUM_ROBOTICS),
            vec![
                ("Fetch".to_string(), 4),
                ("Shadow Dexterous Hand".to_string(), 7),
                ("Maze".to_string(), 6),
                ("Adroit Hand".to_string(), 4),
                ("Franka Kitchen".to_string(), 1),
            ]
        );
        assert_eq!(catalogue.len(), 149);
    }

    #[test]
    fn ids_get_their_suffixes() {
        let catalogue = Catalogue::standard();
        let gym = &catalogue.domains()[GYMNASIUM];
        assert_eq!(gym["MuJoCo"][0], "Ant-v5");
        assert_eq!(gym["Atari"][0], "ALE/Adventure-v5");
        assert!(gym["Atari"].contains(&"ALE/Pong-v5".to_string()));

        let robotics = &catalogue.domains()[GYMNASIUM_ROBOTICS];
        assert_eq!(robotics["Fetch"][2], "FetchReach-v3");
        assert_eq!(robotics["Shadow Dexterous Hand"].last().unwrap(), "HandReach-v2");
    }

    #[test]
    fn building_twice_is_identical() {
        let a = Catalogue::standard();
        let b = Catalogue::standard();
        assert_eq!(a, b);
        assert!(a.entries().eq(b.entries()));
    }

    #[test]
    fn special_subsets_are_exact() {
        let catalogue = Catalogue::standard();
        let atari: HashSet<String> = catalogue.domains()[GYMNASIUM]["Atari"].iter().cloned().collect();
        assert_eq!(catalogue.arcade_ids(), &atari);

        let robotics: HashSet<String> = catalogue.domains()[GYMNASIUM_ROBOTICS]
            .values()
            .flatten()
            .cloned()
            .collect();
        assert_eq!(catalogue.robotics_ids(), &robotics);
        assert!(catalogue.arcade_ids().is_disjoint(catalogue.robotics_ids()));

        for (_, _, id) in catalogue.entries() {
            let needed = catalogue.extensions_for(id);
            assert!(needed.len() <= 1, "{id} needs {needed:?}");
        }
    }

    #[test]
    fn extension_lookup() {
        let catalogue = Catalogue::standard();
        assert_eq!(catalogue.extensions_for("ALE/Pong-v5"), vec![Extension::Arcade]);
        assert_eq!(catalogue.extensions_for("FetchReach-v3"), vec![Extension::Robotics]);
        assert!(catalogue.extensions_for("CartPole-v1").is_empty());
        assert!(catalogue.extensions_for("Blackjack-v1").is_empty());
        assert!(catalogue.extensions_for("NotInTheCatalogue-v0").is_empty());
    }

    #[test]
    fn duplicates_pass_through() {
        let mut subdomains = Subdomains::new();
        subdomains.insert("Twice".to_string(), vec!["A-v0".to_string(), "A-v0".to_string()]);
        let mut domains = IndexMap::new();
        domains.insert("Test".to_string(), subdomains);
        let catalogue = Catalogue::from_parts(domains, [], []);
        assert_eq!(catalogue.len(), 2);
        let ids: Vec<&str> = catalogue.entries().map(|(_, _, id)| id).collect();
        assert_eq!(ids, ["A-v0", "A-v0"]);
    }
}
