use std::collections::BTreeMap;

/// Acquisition text shown in the HUD popup, by pickup or conditional name.
///
/// Templates may reference resource display names as `{Name}`; the quantity
/// the pickup grants is substituted in.
const DEFAULT_MEMO_TEXT: &[(&str, &str)] = &[
    ("Dark Beam", "Dark Beam acquired!"),
    ("Light Beam", "Light Beam acquired!"),
    ("Annihilator Beam", "Annihilator Beam acquired!"),
    ("Super Missile", "Super Missile acquired!"),
    ("Darkburst", "Darkburst acquired!"),
    ("Sunburst", "Sunburst acquired!"),
    ("Sonic Boom", "Sonic Boom acquired!"),
    ("Combat Visor", "Combat Visor acquired!"),
    ("Scan Visor", "Scan Visor acquired!"),
    ("Dark Visor", "Dark Visor acquired!"),
    ("Echo Visor", "Echo Visor acquired!"),
    ("Varia Suit", "Varia Suit acquired!"),
    ("Dark Suit", "Dark Suit acquired!"),
    ("Light Suit", "Light Suit acquired!"),
    ("Morph Ball", "Morph Ball acquired!"),
    ("Boost Ball", "Boost Ball acquired!"),
    ("Spider Ball", "Spider Ball acquired!"),
    ("Morph Ball Bomb", "Morph Ball Bomb acquired!"),
    ("Space Jump Boots", "Space Jump Boots acquired!"),
    ("Gravity Boost", "Gravity Boost acquired!"),
    ("Grapple Beam", "Grapple Beam acquired!"),
    ("Screw Attack", "Screw Attack acquired!"),
    ("Seeker Launcher", "Seeker Launcher acquired!"),
    ("Charge Beam", "Charge Beam acquired!"),
    ("Missile Launcher", "Missile Launcher acquired!"),
    ("Power Bomb", "Power Bomb acquired!"),
    ("Energy Tank", "Energy Tank acquired!"),
    ("Violet Translator", "Violet Translator acquired!"),
    ("Amber Translator", "Amber Translator acquired!"),
    ("Emerald Translator", "Emerald Translator acquired!"),
    ("Cobalt Translator", "Cobalt Translator acquired!"),
    ("Missile Expansion", "Missile Expansion acquired! {Missile} Missiles added."),
    ("Power Bomb Expansion", "Power Bomb Expansion acquired! {Power Bomb} Power Bombs added."),
    (
        "Beam Ammo Expansion",
        "Beam Ammo Expansion acquired! {Dark Ammo} Dark and {Light Ammo} Light Ammo added.",
    ),
    ("Dark Agon Key 1", "Dark Agon Key 1 acquired!"),
    ("Dark Agon Key 2", "Dark Agon Key 2 acquired!"),
    ("Dark Agon Key 3", "Dark Agon Key 3 acquired!"),
    ("Dark Torvus Key 1", "Dark Torvus Key 1 acquired!"),
    ("Dark Torvus Key 2", "Dark Torvus Key 2 acquired!"),
    ("Dark Torvus Key 3", "Dark Torvus Key 3 acquired!"),
    ("Ing Hive Key 1", "Ing Hive Key 1 acquired!"),
    ("Ing Hive Key 2", "Ing Hive Key 2 acquired!"),
    ("Ing Hive Key 3", "Ing Hive Key 3 acquired!"),
    ("Sky Temple Key 1", "Sky Temple Key 1 acquired!"),
    ("Sky Temple Key 2", "Sky Temple Key 2 acquired!"),
    ("Sky Temple Key 3", "Sky Temple Key 3 acquired!"),
    ("Sky Temple Key 4", "Sky Temple Key 4 acquired!"),
    ("Sky Temple Key 5", "Sky Temple Key 5 acquired!"),
    ("Sky Temple Key 6", "Sky Temple Key 6 acquired!"),
    ("Sky Temple Key 7", "Sky Temple Key 7 acquired!"),
    ("Sky Temple Key 8", "Sky Temple Key 8 acquired!"),
    ("Sky Temple Key 9", "Sky Temple Key 9 acquired!"),
    ("Energy Transfer Module", "Energy Transfer Module acquired!"),
    (
        "Temporary Missile",
        "Missile Expansion acquired! {Missile} Missiles added, but the Missile Launcher is required to use them.",
    ),
    (
        "Temporary Power Bombs",
        "Power Bomb Expansion acquired! {Power Bomb} Power Bombs added, but the main Power Bomb is required to use them.",
    ),
];

const SIMPLIFIED_MEMO_TEXT: &[(&str, &str)] = &[
    (
        "Temporary Power Bombs",
        "Power Bomb Expansion acquired, but the main Power Bomb is required to use it.",
    ),
    (
        "Temporary Missile",
        "Missile Expansion acquired, but the Missile Launcher, is required to use it.",
    ),
];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoData {
    templates: BTreeMap<String, String>,
}

impl MemoData {
    pub fn new(templates: BTreeMap<String, String>) -> Self {
        Self { templates }
    }

    fn from_table(table: &[(&str, &str)]) -> Self {
        Self::new(
            table
                .iter()
                .map(|(name, text)| (name.to_string(), text.to_string()))
                .collect(),
        )
    }

    /// Full flavour text for every known pickup.
    pub fn full() -> Self {
        Self::from_table(DEFAULT_MEMO_TEXT)
    }

    /// Short popups: only the texts that carry a gameplay warning.
    pub fn simplified() -> Self {
        Self::from_table(SIMPLIFIED_MEMO_TEXT)
    }

    pub fn template(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(String::as_str)
    }

    /// Render the popup for `name`. Names without a template fall back to
    /// `"<name> acquired!"`.
    pub fn hud_text(&self, name: &str, quantities: &[(&str, i32)]) -> String {
        match self.template(name) {
            Some(template) => render_template(template, quantities),
            None => format!("{name} acquired!"),
        }
    }
}

/// Substitute `{Name}` fields with quantities. `{{` and `}}` are literal
/// braces; fields with no matching quantity are kept as written.
pub fn render_template(template: &str, quantities: &[(&str, i32)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") || tail.starts_with("}}") {
            out.push_str(&tail[..1]);
            rest = &tail[2..];
            continue;
        }

        if tail.starts_with('}') {
            out.push('}');
            rest = &tail[1..];
            continue;
        }

        match tail.find('}') {
            Some(end) => {
                let field = &tail[1..end];
                match quantities.iter().find(|(name, _)| *name == field) {
                    Some((_, quantity)) => out.push_str(&quantity.to_string()),
                    None => out.push_str(&tail[..=end]),
                }
                rest = &tail[end + 1..];
            }
            None => {
                out.push_str(tail);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
