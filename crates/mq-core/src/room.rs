use std::collections::BTreeMap;
use std::fmt;

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::character::CharacterId;
use crate::error::{MqError, MqResult};

/// Tag identifying a room in the manor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    /// The central hall.
    Ballroom,
    /// Blind spot in the standard layout.
    Bathroom,
    /// Open-air terrace.
    Balcony,
    /// Quiet study.
    Study,
    /// Blind spot in the standard layout.
    WineCellar,
    /// Garden courtyard.
    Courtyard,
}

impl RoomType {
    /// Every room type in declaration order.
    pub const ALL: [RoomType; 6] = [
        RoomType::Ballroom,
        RoomType::Bathroom,
        RoomType::Balcony,
        RoomType::Study,
        RoomType::WineCellar,
        RoomType::Courtyard,
    ];
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ballroom => "Ballroom",
            Self::Bathroom => "Bathroom",
            Self::Balcony => "Balcony",
            Self::Study => "Study",
            Self::WineCellar => "Wine Cellar",
            Self::Courtyard => "Courtyard",
        };
        write!(f, "{name}")
    }
}

/// A room: its adjacency list and who is currently inside.
///
/// Connections keep insertion order; movement heuristics scan them in that
/// order, so it is part of the observable behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    /// The room's tag.
    pub kind: RoomType,
    /// Display name.
    pub name: String,
    /// Occupants here cannot be observed by the player.
    pub blind_spot: bool,
    connections: Vec<RoomType>,
    occupants: Vec<CharacterId>,
}

impl Room {
    /// Create an empty, unconnected room.
    pub fn new(kind: RoomType, name: impl Into<String>, blind_spot: bool) -> Self {
        Self {
            kind,
            name: name.into(),
            blind_spot,
            connections: Vec::new(),
            occupants: Vec::new(),
        }
    }

    /// Adjacent rooms in enumeration order.
    pub fn connections(&self) -> &[RoomType] {
        &self.connections
    }

    /// Return `true` if `other` is adjacent to this room.
    pub fn is_connected_to(&self, other: RoomType) -> bool {
        self.connections.contains(&other)
    }

    /// Current occupants in arrival order.
    pub fn occupants(&self) -> &[CharacterId] {
        &self.occupants
    }

    /// Number of current occupants.
    pub fn occupant_count(&self) -> usize {
        self.occupants.len()
    }

    /// Occupants the player can see: none if this is a blind spot.
    pub fn visible_occupants(&self) -> &[CharacterId] {
        if self.blind_spot { &[] } else { &self.occupants }
    }

    pub(crate) fn add_occupant(&mut self, id: CharacterId) {
        if !self.occupants.contains(&id) {
            self.occupants.push(id);
        }
    }

    pub(crate) fn remove_occupant(&mut self, id: CharacterId) {
        self.occupants.retain(|o| *o != id);
    }
}

/// Undirected room connectivity plus occupancy lists.
#[derive(Debug, Clone)]
pub struct RoomGraph {
    rooms: BTreeMap<RoomType, Room>,
    home: RoomType,
}

impl RoomGraph {
    /// Create an empty graph whose fallback room is `home`.
    pub fn new(home: RoomType) -> Self {
        Self {
            rooms: BTreeMap::new(),
            home,
        }
    }

    /// Add a room, replacing any previous room with the same tag.
    pub fn add_room(&mut self, room: Room) {
        self.rooms.insert(room.kind, room);
    }

    /// Connect two rooms in both directions. Connecting an existing pair is a no-op.
    pub fn connect(&mut self, a: RoomType, b: RoomType) -> MqResult<()> {
        if a == b {
            return Err(MqError::SelfConnection(a));
        }
        if !self.rooms.contains_key(&b) {
            return Err(MqError::UnknownRoom(b));
        }
        let room_a = self.rooms.get_mut(&a).ok_or(MqError::UnknownRoom(a))?;
        if !room_a.connections.contains(&b) {
            room_a.connections.push(b);
        }
        if let Some(room_b) = self.rooms.get_mut(&b) {
            if !room_b.connections.contains(&a) {
                room_b.connections.push(a);
            }
        }
        Ok(())
    }

    /// Look up a room.
    pub fn room(&self, kind: RoomType) -> Option<&Room> {
        self.rooms.get(&kind)
    }

    pub(crate) fn room_mut(&mut self, kind: RoomType) -> Option<&mut Room> {
        self.rooms.get_mut(&kind)
    }

    /// All rooms in tag order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// All room tags in tag order.
    pub fn kinds(&self) -> Vec<RoomType> {
        self.rooms.keys().copied().collect()
    }

    /// The non-blind fallback room.
    pub fn home(&self) -> RoomType {
        self.home
    }

    /// Number of rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Return `true` if the graph has no rooms.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Adjacent rooms of `kind`, empty if the room is unknown.
    pub fn connections(&self, kind: RoomType) -> &[RoomType] {
        self.rooms.get(&kind).map(Room::connections).unwrap_or(&[])
    }

    /// Return `true` if `a` lists `b` as adjacent.
    pub fn is_adjacent(&self, a: RoomType, b: RoomType) -> bool {
        self.rooms.get(&a).is_some_and(|r| r.is_connected_to(b))
    }

    /// Occupants of `kind`, empty if the room is unknown.
    pub fn occupants(&self, kind: RoomType) -> &[CharacterId] {
        self.rooms.get(&kind).map(Room::occupants).unwrap_or(&[])
    }

    /// Return `true` if `kind` is a blind spot.
    pub fn is_blind_spot(&self, kind: RoomType) -> bool {
        self.rooms.get(&kind).is_some_and(|r| r.blind_spot)
    }

    /// A uniformly random adjacent room, or `None` if `kind` is isolated.
    pub fn random_connection(&self, kind: RoomType, rng: &mut StdRng) -> Option<RoomType> {
        let connections = self.connections(kind);
        if connections.is_empty() {
            return None;
        }
        Some(connections[rng.random_range(0..connections.len())])
    }

    /// The adjacent room with the strictly greatest occupant count; first seen wins ties.
    pub fn most_crowded_connection(&self, kind: RoomType) -> Option<RoomType> {
        let mut best: Option<(RoomType, usize)> = None;
        for &next in self.connections(kind) {
            let count = self.occupants(next).len();
            if best.is_none_or(|(_, max)| count > max) {
                best = Some((next, count));
            }
        }
        best.map(|(room, _)| room)
    }
}

/// Declarative description of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSpec {
    /// The room's tag.
    pub kind: RoomType,
    /// Display name.
    pub name: String,
    /// Whether occupants are hidden from the player.
    #[serde(default)]
    pub blind_spot: bool,
}

/// Fixed connectivity table a room graph is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomLayout {
    /// Rooms in the manor.
    pub rooms: Vec<RoomSpec>,
    /// Undirected edges.
    pub connections: Vec<(RoomType, RoomType)>,
    /// Non-blind room used when every planned move would hide the whole cast.
    pub home: RoomType,
}

impl RoomLayout {
    /// The built-in six-room layout with the Ballroom as the hub.
    pub fn standard() -> Self {
        use RoomType::*;
        let spec = |kind: RoomType, blind_spot: bool| RoomSpec {
            kind,
            name: kind.to_string(),
            blind_spot,
        };
        Self {
            rooms: vec![
                spec(Ballroom, false),
                spec(Bathroom, true),
                spec(Balcony, false),
                spec(Study, false),
                spec(WineCellar, true),
                spec(Courtyard, false),
            ],
            connections: vec![
                (Study, WineCellar),
                (Study, Ballroom),
                (Ballroom, WineCellar),
                (Ballroom, Bathroom),
                (Ballroom, Balcony),
                (Ballroom, Courtyard),
                (Balcony, Courtyard),
            ],
            home: Ballroom,
        }
    }

    /// Build the graph, failing if the layout is empty or inconsistent.
    pub fn build(&self) -> MqResult<RoomGraph> {
        if self.rooms.is_empty() {
            return Err(MqError::Config("room layout has no rooms".into()));
        }
        let mut graph = RoomGraph::new(self.home);
        for spec in &self.rooms {
            graph.add_room(Room::new(spec.kind, spec.name.clone(), spec.blind_spot));
        }
        match graph.room(self.home) {
            None => {
                return Err(MqError::Config(format!(
                    "home room {} is not in the layout",
                    self.home
                )));
            }
            Some(home) if home.blind_spot => {
                return Err(MqError::Config(format!(
                    "home room {} must not be a blind spot",
                    self.home
                )));
            }
            Some(_) => {}
        }
        for &(a, b) in &self.connections {
            graph.connect(a, b)?;
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn standard_graph() -> RoomGraph {
        RoomLayout::standard().build().unwrap()
    }

    #[test]
    fn standard_layout_builds() {
        let graph = standard_graph();
        assert_eq!(graph.len(), 6);
        assert_eq!(graph.home(), RoomType::Ballroom);
        assert!(graph.is_blind_spot(RoomType::Bathroom));
        assert!(graph.is_blind_spot(RoomType::WineCellar));
        assert!(!graph.is_blind_spot(RoomType::Study));
        assert_eq!(
            graph.connections(RoomType::Study),
            &[RoomType::WineCellar, RoomType::Ballroom]
        );
        assert_eq!(graph.connections(RoomType::Ballroom).len(), 5);
    }

    #[test]
    fn connect_is_idempotent() {
        let mut graph = standard_graph();
        graph.connect(RoomType::Study, RoomType::Ballroom).unwrap();
        graph.connect(RoomType::Ballroom, RoomType::Study).unwrap();
        assert_eq!(graph.connections(RoomType::Study).len(), 2);
        assert_eq!(
            graph
                .connections(RoomType::Ballroom)
                .iter()
                .filter(|r| **r == RoomType::Study)
                .count(),
            1
        );
    }

    #[test]
    fn connect_rejects_self_and_unknown() {
        let mut graph = RoomGraph::new(RoomType::Ballroom);
        graph.add_room(Room::new(RoomType::Ballroom, "Ballroom", false));
        assert!(matches!(
            graph.connect(RoomType::Ballroom, RoomType::Ballroom),
            Err(MqError::SelfConnection(RoomType::Ballroom))
        ));
        assert!(matches!(
            graph.connect(RoomType::Ballroom, RoomType::Study),
            Err(MqError::UnknownRoom(RoomType::Study))
        ));
    }

    #[test]
    fn random_connection_none_when_isolated() {
        let mut graph = RoomGraph::new(RoomType::Ballroom);
        graph.add_room(Room::new(RoomType::Ballroom, "Ballroom", false));
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(graph.random_connection(RoomType::Ballroom, &mut rng), None);
    }

    #[test]
    fn random_connection_is_adjacent() {
        let graph = standard_graph();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let next = graph.random_connection(RoomType::Balcony, &mut rng).unwrap();
            assert!(graph.is_adjacent(RoomType::Balcony, next));
        }
    }

    #[test]
    fn most_crowded_prefers_first_on_tie() {
        let mut graph = standard_graph();
        // All empty: first connection wins.
        assert_eq!(
            graph.most_crowded_connection(RoomType::Ballroom),
            Some(RoomType::Study)
        );
        graph
            .room_mut(RoomType::Courtyard)
            .unwrap()
            .add_occupant(CharacterId(0));
        assert_eq!(
            graph.most_crowded_connection(RoomType::Ballroom),
            Some(RoomType::Courtyard)
        );
    }

    #[test]
    fn blind_spot_hides_occupants() {
        let mut graph = standard_graph();
        let bathroom = graph.room_mut(RoomType::Bathroom).unwrap();
        bathroom.add_occupant(CharacterId(3));
        assert_eq!(bathroom.occupant_count(), 1);
        assert!(bathroom.visible_occupants().is_empty());
    }

    #[test]
    fn layout_validation() {
        let mut layout = RoomLayout::standard();
        layout.home = RoomType::Bathroom;
        assert!(matches!(layout.build(), Err(MqError::Config(_))));

        let empty = RoomLayout {
            rooms: Vec::new(),
            connections: Vec::new(),
            home: RoomType::Ballroom,
        };
        assert!(matches!(empty.build(), Err(MqError::Config(_))));
    }

    fn room_type() -> impl Strategy<Value = RoomType> {
        (0..RoomType::ALL.len()).prop_map(|i| RoomType::ALL[i])
    }

    proptest! {
        #[test]
        fn adjacency_is_symmetric(edges in proptest::collection::vec((room_type(), room_type()), 0..30)) {
            let mut graph = RoomGraph::new(RoomType::Ballroom);
            for kind in RoomType::ALL {
                graph.add_room(Room::new(kind, kind.to_string(), false));
            }
            for (a, b) in edges {
                let _ = graph.connect(a, b);
            }
            for a in RoomType::ALL {
                for b in RoomType::ALL {
                    prop_assert_eq!(graph.is_adjacent(a, b), graph.is_adjacent(b, a));
                }
            }
        }
    }
}
