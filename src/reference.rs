//! Reference pattern graph
//!
//! Static catalog of known weak character relations: physical keyboard
//! adjacency, shift pairs, alphabetic/numeric sequences and self-repeats.
//! Built once per process and shared read-only by every analysis request.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Kind of weak relation between two characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// The two characters sit on physically neighboring keys.
    AdjacentKey,
    /// Base and shifted character of the same physical key.
    ShiftPair,
    /// Consecutive letters or consecutive digits.
    Sequential,
    /// Same character typed twice in a row.
    RepeatSelf,
}

impl RelationKind {
    const ALL: [RelationKind; 4] = [
        RelationKind::AdjacentKey,
        RelationKind::ShiftPair,
        RelationKind::Sequential,
        RelationKind::RepeatSelf,
    ];

    fn bit(self) -> u8 {
        match self {
            RelationKind::AdjacentKey => 1 << 0,
            RelationKind::ShiftPair => 1 << 1,
            RelationKind::Sequential => 1 << 2,
            RelationKind::RepeatSelf => 1 << 3,
        }
    }
}

/// Compact set of [`RelationKind`]s holding between one character pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelationSet(u8);

impl RelationSet {
    pub const EMPTY: RelationSet = RelationSet(0);

    pub fn insert(&mut self, kind: RelationKind) {
        self.0 |= kind.bit();
    }

    pub fn contains(self, kind: RelationKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn union(self, other: RelationSet) -> RelationSet {
        RelationSet(self.0 | other.0)
    }

    /// Iterates the kinds present, in declaration order.
    pub fn kinds(self) -> impl Iterator<Item = RelationKind> {
        RelationKind::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

/// Character class used by the variety scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Lower,
    Upper,
    Digit,
    Symbol,
}

impl CharClass {
    /// Classifies a character. Anything outside ASCII letters and digits,
    /// non-ASCII input included, counts as a symbol.
    pub fn of(c: char) -> CharClass {
        if c.is_ascii_lowercase() {
            CharClass::Lower
        } else if c.is_ascii_uppercase() {
            CharClass::Upper
        } else if c.is_ascii_digit() {
            CharClass::Digit
        } else {
            CharClass::Symbol
        }
    }
}

/// Physical key rows of a standard row-staggered QWERTY layout.
const KEY_ROWS: [&str; 4] = ["`1234567890-=", "qwertyuiop[]\\", "asdfghjkl;'", "zxcvbnm,./"];

/// Base character and its shifted counterpart on the same physical key.
const SHIFT_PAIRS: [(char, char); 21] = [
    ('`', '~'),
    ('1', '!'),
    ('2', '@'),
    ('3', '#'),
    ('4', '$'),
    ('5', '%'),
    ('6', '^'),
    ('7', '&'),
    ('8', '*'),
    ('9', '('),
    ('0', ')'),
    ('-', '_'),
    ('=', '+'),
    ('[', '{'),
    (']', '}'),
    ('\\', '|'),
    (';', ':'),
    ('\'', '"'),
    (',', '<'),
    ('.', '>'),
    ('/', '?'),
];

/// Immutable lookup table of weak character relations.
///
/// Keyed by unordered character pair; [`ReferenceGraph::relations`] is O(1)
/// and symmetric. The table never changes after construction, so it can be
/// shared across threads without locking.
#[derive(Debug)]
pub struct ReferenceGraph {
    relations: HashMap<(char, char), RelationSet>,
}

impl ReferenceGraph {
    /// Builds the full relation table. Prefer [`reference_graph`] outside
    /// tests; the table is identical for every instance.
    pub fn build() -> ReferenceGraph {
        let mut graph = ReferenceGraph { relations: HashMap::new() };
        graph.add_adjacency_relations();
        graph.add_shift_relations();
        graph.add_sequential_relations();
        graph.add_repeat_relations();

        #[cfg(feature = "tracing")]
        tracing::debug!("reference graph built: {} character pairs", graph.relations.len());

        graph
    }

    /// Relation kinds holding between `a` and `b`. Symmetric; `a == b`
    /// answers repeat-self only. Characters outside the printable ASCII
    /// alphabet always map to the empty set.
    pub fn relations(&self, a: char, b: char) -> RelationSet {
        self.relations.get(&pair_key(a, b)).copied().unwrap_or(RelationSet::EMPTY)
    }

    /// True when at least one weak relation holds between `a` and `b`.
    pub fn related(&self, a: char, b: char) -> bool {
        !self.relations(a, b).is_empty()
    }

    fn add(&mut self, a: char, b: char, kind: RelationKind) {
        self.relations.entry(pair_key(a, b)).or_default().insert(kind);
    }

    /// Adjacent-key edges: every pair of distinct characters whose physical
    /// keys are grid neighbors (diagonals included). Shifted characters sit
    /// on their base key's position and inherit its neighborhood. Letter
    /// pairs are added in both cases but never cross-case; a letter next to
    /// a symbol or digit relates in both cases.
    fn add_adjacency_relations(&mut self) {
        let mut by_position: HashMap<(i32, i32), Vec<char>> = HashMap::new();
        let shifted: HashMap<char, char> = SHIFT_PAIRS.iter().copied().collect();
        for (r, row) in KEY_ROWS.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                let cell = by_position.entry((r as i32, c as i32)).or_default();
                cell.push(ch);
                if let Some(&up) = shifted.get(&ch) {
                    cell.push(up);
                }
            }
        }

        for (&(r, c), chars) in &by_position {
            for dr in -1..=1 {
                for dc in -1..=1 {
                    if dr == 0 && dc == 0 {
                        continue;
                    }
                    let Some(neighbors) = by_position.get(&(r + dr, c + dc)) else {
                        continue;
                    };
                    for &a in chars {
                        for &b in neighbors {
                            self.add_adjacent_cased(a, b);
                        }
                    }
                }
            }
        }
    }

    fn add_adjacent_cased(&mut self, a: char, b: char) {
        self.add(a, b, RelationKind::AdjacentKey);
        match (a.is_ascii_alphabetic(), b.is_ascii_alphabetic()) {
            (true, true) => self.add(a.to_ascii_uppercase(), b.to_ascii_uppercase(), RelationKind::AdjacentKey),
            (true, false) => self.add(a.to_ascii_uppercase(), b, RelationKind::AdjacentKey),
            (false, true) => self.add(a, b.to_ascii_uppercase(), RelationKind::AdjacentKey),
            (false, false) => {}
        }
    }

    fn add_shift_relations(&mut self) {
        for (base, shifted) in SHIFT_PAIRS {
            self.add(base, shifted, RelationKind::ShiftPair);
        }
        for low in 'a'..='z' {
            self.add(low, low.to_ascii_uppercase(), RelationKind::ShiftPair);
        }
    }

    fn add_sequential_relations(&mut self) {
        for win in ('a'..='z').collect::<Vec<_>>().windows(2) {
            self.add(win[0], win[1], RelationKind::Sequential);
            self.add(win[0].to_ascii_uppercase(), win[1].to_ascii_uppercase(), RelationKind::Sequential);
        }
        for win in ('0'..='9').collect::<Vec<_>>().windows(2) {
            self.add(win[0], win[1], RelationKind::Sequential);
        }
    }

    fn add_repeat_relations(&mut self) {
        for c in '\u{20}'..='\u{7e}' {
            self.add(c, c, RelationKind::RepeatSelf);
        }
    }
}

fn pair_key(a: char, b: char) -> (char, char) {
    if a <= b { (a, b) } else { (b, a) }
}

static REFERENCE: OnceLock<ReferenceGraph> = OnceLock::new();

/// Process-wide shared reference graph, built on first use.
pub fn reference_graph() -> &'static ReferenceGraph {
    REFERENCE.get_or_init(ReferenceGraph::build)
}
