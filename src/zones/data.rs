//! Zone definitions for the Dreamlands.

/// An item hidden somewhere in a zone.
#[derive(Debug, Clone, PartialEq)]
pub struct Discoverable {
    pub item: &'static str,
    pub location: &'static str,
}

/// A zone of the world graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub id: &'static str,
    pub name: &'static str,
    /// Distance from the waking world, 1-based. Scales resurrection cost.
    pub depth: u32,
    /// Safe zones allow resting without an inn.
    pub safe: bool,
    pub inn: bool,
    pub has_shop: bool,
    pub connections: Vec<&'static str>,
    /// (enemy id, base probability), tested in order.
    pub encounters: Vec<(&'static str, f64)>,
    pub discoverables: Vec<Discoverable>,
    pub npc: Option<&'static str>,
}

impl Zone {
    pub fn is_final(&self) -> bool {
        self.connections.is_empty()
    }
}

fn hidden(item: &'static str, location: &'static str) -> Discoverable {
    Discoverable { item, location }
}

/// Returns all zones in the game, ordered by depth.
pub fn get_all_zones() -> Vec<Zone> {
    vec![
        Zone {
            id: "ulthar",
            name: "Ulthar",
            depth: 1,
            safe: true,
            inn: true,
            has_shop: true,
            connections: vec!["zoog_forest", "celephais"],
            encounters: vec![("zoog", 0.1)],
            discoverables: vec![hidden("common_stone", "near the fountain")],
            npc: Some("menes"),
        },
        Zone {
            id: "zoog_forest",
            name: "Enchanted Wood of the Zoogs",
            depth: 2,
            safe: false,
            inn: false,
            has_shop: true,
            connections: vec!["ulthar", "dylath_leen", "smoke_mountains"],
            encounters: vec![("zoog", 0.25), ("ghoul", 0.1)],
            discoverables: vec![hidden("dream_kitten", "among the oak roots")],
            npc: Some("grey_zoog"),
        },
        Zone {
            id: "dylath_leen",
            name: "Dylath-Leen",
            depth: 3,
            safe: true,
            inn: true,
            has_shop: true,
            connections: vec!["zoog_forest", "smoke_mountains", "oriab_sea"],
            encounters: vec![("ghoul", 0.15)],
            discoverables: vec![],
            npc: Some("arash"),
        },
        Zone {
            id: "smoke_mountains",
            name: "Mountains of Smoke",
            depth: 4,
            safe: false,
            inn: false,
            has_shop: false,
            connections: vec!["zoog_forest", "dylath_leen", "zak_catacombs"],
            encounters: vec![("ghoul", 0.2), ("ghast", 0.15), ("shantak", 0.05)],
            discoverables: vec![hidden("map_fragment", "in a collapsed shrine")],
            npc: None,
        },
        Zone {
            id: "zak_catacombs",
            name: "Catacombs of Zak",
            depth: 5,
            safe: false,
            inn: false,
            has_shop: false,
            connections: vec!["smoke_mountains", "celephais"],
            encounters: vec![
                ("ghoul", 0.3),
                ("faceless_priest", 0.15),
                ("elder_ghoul", 0.1),
            ],
            discoverables: vec![
                hidden("catacomb_key", "on a hidden altar"),
                hidden("seal_of_zak", "sealed in an ossuary"),
            ],
            npc: None,
        },
        Zone {
            id: "celephais",
            name: "Celephaïs",
            depth: 6,
            safe: true,
            inn: true,
            has_shop: true,
            connections: vec!["ulthar", "zak_catacombs", "oriab_sea"],
            encounters: vec![],
            discoverables: vec![hidden("dream_crystal", "atop the tower of Kuranes")],
            npc: Some("kuranes"),
        },
        Zone {
            id: "oriab_sea",
            name: "Isle of Oriab",
            depth: 7,
            safe: false,
            inn: false,
            has_shop: false,
            connections: vec!["dylath_leen", "celephais", "inquanok"],
            encounters: vec![("nightgaunt", 0.2)],
            discoverables: vec![
                hidden("nodens_statue", "in a tidal cave"),
                hidden("seal_of_oriab", "beneath the basalt cliffs"),
            ],
            npc: Some("sea_hermit"),
        },
        Zone {
            id: "inquanok",
            name: "Inquanok",
            depth: 8,
            safe: false,
            inn: false,
            has_shop: false,
            connections: vec!["oriab_sea", "leng_plateau"],
            encounters: vec![
                ("faceless_priest", 0.25),
                ("nightgaunt", 0.2),
                ("shantak", 0.1),
            ],
            discoverables: vec![hidden("map_fragment", "carved into an onyx quarry")],
            npc: None,
        },
        Zone {
            id: "leng_plateau",
            name: "Plateau of Leng",
            depth: 9,
            safe: false,
            inn: false,
            has_shop: false,
            connections: vec!["inquanok", "kadath"],
            encounters: vec![
                ("faceless_priest", 0.3),
                ("leng_guardian", 0.1),
                ("leng_sorcerer", 0.05),
                ("gnophkeh", 0.05),
            ],
            discoverables: vec![hidden("seal_of_leng", "inside a windowless monastery")],
            npc: None,
        },
        Zone {
            id: "kadath",
            name: "Unknown Kadath",
            depth: 10,
            safe: false,
            inn: false,
            has_shop: false,
            connections: vec![],
            encounters: vec![],
            discoverables: vec![],
            npc: None,
        },
    ]
}
