//! Terminal rendering. Reads the state machine, never mutates it.

use kadath::character::manager::{Slot, SlotStatus};
use kadath::character::player::Player;
use kadath::character::quests::QuestState;
use kadath::character::spells::Spell;
use kadath::core::game_state::{GameMode, GameStateMachine};
use kadath::core::input::{legend, Prompt};
use kadath::items::shop_stock;
use rand::Rng;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw<R: Rng>(frame: &mut Frame, machine: &GameStateMachine<'_, R>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Status
            Constraint::Min(8),    // Body
            Constraint::Length(8), // Messages
            Constraint::Length(3), // Legend
        ])
        .split(frame.size());

    draw_status(frame, chunks[0], machine);
    draw_body(frame, chunks[1], machine);
    draw_messages(frame, chunks[2], machine);

    let keys = Paragraph::new(legend(machine.mode(), machine.prompt()))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(keys, chunks[3]);
}

fn draw_status<R: Rng>(frame: &mut Frame, area: Rect, machine: &GameStateMachine<'_, R>) {
    let line = match machine.player() {
        Some(p) => {
            let zone = machine
                .registry()
                .zone(p.zone)
                .map_or(p.zone, |z| z.name);
            Line::from(vec![
                Span::styled(
                    zone,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" | "),
                Span::styled(
                    format!("HP {}/{}", p.health, p.health_max),
                    Style::default().fg(Color::Red),
                ),
                Span::raw(" | "),
                Span::styled(
                    format!("Sanity {}/{}", p.sanity, p.sanity_max),
                    Style::default().fg(Color::Magenta),
                ),
                Span::raw(" | "),
                Span::styled(
                    format!("Will {}/{}", p.willpower, p.willpower_max),
                    Style::default().fg(Color::Blue),
                ),
                Span::raw(" | "),
                Span::styled(format!("{}g", p.gold), Style::default().fg(Color::Yellow)),
                Span::raw(format!(
                    " | Lv {} | Turn {} | {}",
                    p.level,
                    p.turn,
                    p.cycle.id()
                )),
            ])
        }
        None => Line::from(Span::styled(
            "The Dream-Quest of Unknown Kadath",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
    };
    let status = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn draw_body<R: Rng>(frame: &mut Frame, area: Rect, machine: &GameStateMachine<'_, R>) {
    let mode = machine.mode();
    let lines = match (mode, machine.player()) {
        (GameMode::Menu, _) => menu_lines(machine),
        (GameMode::Bestiary, _) => machine
            .bestiary_owner()
            .map(|p| bestiary_lines(machine, p))
            .unwrap_or_else(|| vec![Line::from("No creatures recorded.")]),
        (GameMode::Ending, _) => ending_lines(machine),
        (GameMode::Help, _) => help_lines(),
        (GameMode::LevelUp, _) => machine
            .upgrades()
            .iter()
            .enumerate()
            .map(|(i, u)| Line::from(format!("[{}] {}", i + 1, u.description())))
            .collect(),
        (_, None) => Vec::new(),
        (GameMode::Combat, Some(p)) => combat_lines(machine, p),
        (GameMode::Inventory, Some(p)) => inventory_lines(p),
        (GameMode::Shop, Some(p)) => shop_lines(machine, p),
        (GameMode::Ritual, Some(p)) => ritual_lines(machine, p),
        (GameMode::Map, Some(p)) => map_lines(machine, p),
        (GameMode::Quests, Some(p)) => quest_lines(machine, p),
        (GameMode::Dead, Some(p)) => vec![
            Line::from(Span::styled(
                "You have died.",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "Resurrection costs {} gold. You hold {}.",
                machine.resurrection_cost(p),
                p.gold
            )),
        ],
        (GameMode::Paused, _) => vec![Line::from("Paused.")],
        (GameMode::Exploring, Some(p)) => exploring_lines(machine, p),
    };

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {:?} ", mode)),
        );
    frame.render_widget(body, area);
}

fn draw_messages<R: Rng>(frame: &mut Frame, area: Rect, machine: &GameStateMachine<'_, R>) {
    let lines: Vec<Line> = machine.messages().map(Line::from).collect();
    let skip = lines.len().saturating_sub(area.height.saturating_sub(2) as usize);
    let log = Paragraph::new(lines.into_iter().skip(skip).collect::<Vec<_>>())
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Log "));
    frame.render_widget(log, area);
}

// ── Mode bodies ─────────────────────────────────────────────────

fn menu_lines<R: Rng>(machine: &GameStateMachine<'_, R>) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from("Saved dreams:")];
    for (i, slot) in Slot::LOADABLE.iter().enumerate() {
        let status = match machine.slot_status(*slot) {
            SlotStatus::Empty => "empty".to_string(),
            SlotStatus::Corrupted => "corrupted".to_string(),
            SlotStatus::Occupied {
                zone,
                level,
                timestamp,
            } => format!("{} (level {}) {}", zone, level, timestamp),
        };
        lines.push(Line::from(format!("  [{}] {}: {}", i + 1, slot.name(), status)));
    }
    lines
}

fn exploring_lines<R: Rng>(machine: &GameStateMachine<'_, R>, p: &Player) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(zone) = machine.registry().zone(p.zone) {
        lines.push(Line::from(zone.name));
        let mut notes = Vec::new();
        if zone.safe {
            notes.push("safe");
        }
        if zone.inn {
            notes.push("inn");
        }
        if zone.has_shop {
            notes.push("market");
        }
        if !notes.is_empty() {
            lines.push(Line::from(notes.join(", ")));
        }
    }
    lines.push(Line::from(format!(
        "Weapon: {}  Armor: {}",
        p.weapon.name, p.armor.name
    )));
    lines.push(Line::from(format!(
        "XP {}  Moon: {}  Map fragments: {}",
        p.experience,
        p.lunar_phase.id(),
        p.map_fragments
    )));
    if !p.disorders.is_empty() {
        let names: Vec<&str> = p.disorders.iter().map(|d| d.name()).collect();
        lines.push(Line::from(Span::styled(
            format!("Afflicted: {}", names.join(", ")),
            Style::default().fg(Color::Magenta),
        )));
    }
    if !p.allies.is_empty() {
        let names: Vec<String> = p
            .allies
            .iter()
            .map(|a| format!("{} {}/{}", a.name, a.health, a.max_health))
            .collect();
        lines.push(Line::from(format!("Allies: {}", names.join(", "))));
    }
    lines
}

fn combat_lines<R: Rng>(machine: &GameStateMachine<'_, R>, p: &Player) -> Vec<Line<'static>> {
    let Some(combat) = machine.combat() else {
        return Vec::new();
    };
    let enemy = combat.enemy();
    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                "{}  {}/{}",
                enemy.name(),
                enemy.health,
                enemy.template.max_health
            ),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Round {}", combat.rounds())),
    ];
    if machine.prompt() == Prompt::CombatItem {
        lines.push(Line::from("Use which item?"));
        for (n, index) in p.consumable_slots().into_iter().take(9).enumerate() {
            lines.push(Line::from(format!("  [{}] {}", n + 1, p.inventory[index].name)));
        }
    }
    lines
}

fn inventory_lines(p: &Player) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(format!(
        "Equipped: {} / {}",
        p.weapon.name, p.armor.name
    ))];
    const KEYS: &str = "123456789abcdef";
    for (item, key) in p.inventory.iter().zip(KEYS.chars()) {
        let wear = item
            .durability()
            .map(|d| format!(" ({} uses)", d))
            .unwrap_or_default();
        lines.push(Line::from(format!(
            "  [{}] {} - {}{}",
            key,
            item.name,
            item.kind.category(),
            wear
        )));
    }
    if p.inventory.is_empty() {
        lines.push(Line::from("  (empty)"));
    }
    lines
}

fn ritual_lines<R: Rng>(machine: &GameStateMachine<'_, R>, p: &Player) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(format!("Willpower {}/{}", p.willpower, p.willpower_max))];
    if p.spells.is_empty() {
        lines.push(Line::from("You know no rituals yet."));
    }
    for spell in &p.spells {
        let style = if spell.is_combat_ritual() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!(
                "  {} ({} willpower) - {}",
                spell.name(),
                spell.cost(),
                spell.description()
            ),
            style,
        )));
    }
    if machine.prompt() == Prompt::PortalDestination {
        let registry = machine.registry();
        lines.push(Line::from(format!("{} to where?", Spell::OpenPortal.name())));
        for (i, id) in p.portal_destinations(registry).into_iter().take(9).enumerate() {
            let name = registry.zone(id).map_or(id, |z| z.name);
            lines.push(Line::from(format!("  [{}] {}", i + 1, name)));
        }
    }
    lines
}

fn shop_lines<R: Rng>(machine: &GameStateMachine<'_, R>, p: &Player) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(format!("You hold {} gold.", p.gold))];
    for (i, id) in shop_stock(p.zone).iter().enumerate() {
        if let Some(item) = machine.registry().item(id) {
            lines.push(Line::from(format!(
                "  [{}] {} - {}g",
                i + 1,
                item.name,
                item.buy_value
            )));
        }
    }
    lines
}

fn map_lines<R: Rng>(machine: &GameStateMachine<'_, R>, p: &Player) -> Vec<Line<'static>> {
    let registry = machine.registry();
    let mut lines = Vec::new();
    if let Some(zone) = registry.zone(p.zone) {
        lines.push(Line::from(format!("You are in {}.", zone.name)));
        lines.push(Line::from("Paths lead to:"));
        for (i, id) in zone.connections.iter().enumerate() {
            let name = registry.zone(id).map_or(*id, |z| z.name);
            let seen = if p.has_visited(id) { "" } else { " (unvisited)" };
            lines.push(Line::from(format!("  [{}] {}{}", i + 1, name, seen)));
        }
    }
    lines
}

fn quest_lines<R: Rng>(machine: &GameStateMachine<'_, R>, p: &Player) -> Vec<Line<'static>> {
    let lines: Vec<Line> = machine
        .registry()
        .quests()
        .iter()
        .filter_map(|q| match p.quest_state(q.id) {
            QuestState::Inactive => None,
            QuestState::Active => Some(Line::from(format!("  {} ({})", q.title, q.giver))),
            QuestState::Completed => Some(Line::from(Span::styled(
                format!("  {} - done", q.title),
                Style::default().fg(Color::DarkGray),
            ))),
        })
        .collect();
    if lines.is_empty() {
        vec![Line::from("No quests yet. Talk to the dreamers you meet.")]
    } else {
        lines
    }
}

fn bestiary_lines<R: Rng>(machine: &GameStateMachine<'_, R>, p: &Player) -> Vec<Line<'static>> {
    p.bestiary
        .iter()
        .map(|(id, kills)| {
            let name = machine.registry().enemy(id).map_or(*id, |e| e.name);
            Line::from(format!("  {} - slain {}", name, kills))
        })
        .collect()
}

fn ending_lines<R: Rng>(machine: &GameStateMachine<'_, R>) -> Vec<Line<'static>> {
    let Some(summary) = machine.summary() else {
        return Vec::new();
    };
    vec![
        Line::from(Span::styled(
            summary.ending.title(),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(summary.ending.description()),
        Line::from(""),
        Line::from(format!("Level {}", summary.level)),
        Line::from(format!("Turns {}", summary.turns)),
        Line::from(format!("Quests completed {}", summary.quests_completed)),
        Line::from(format!("Creatures known {}", summary.bestiary_size)),
    ]
}

fn help_lines() -> Vec<Line<'static>> {
    [
        "Seek Kadath beyond the Cold Waste.",
        "Explore to find foes, relics and dreams. Rest at inns and safe places.",
        "Sanity is as precious as health: low sanity breeds disorders.",
        "Gather the three lunar seals and the favour of the cats.",
        "Rituals cost willpower. Open a portal to any place you have dreamed of before.",
    ]
    .into_iter()
    .map(Line::from)
    .collect()
}
