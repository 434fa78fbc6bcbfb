//! プレースホルダ画像
//!
//! モンスターDBで見つからないモンスター向けに、色と絵文字のSVGを返す。
//! 表は起動時に固定され、読み取り専用。

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::collections::HashMap;

/// 表示用の色と絵文字
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    pub color: &'static str,
    pub emoji: &'static str,
}

/// (名前, 色, 絵文字)
const PLACEHOLDERS: &[(&str, &str, &str)] = &[
    ("Zaiross", "#FF6B6B", "🐉"),
    ("Anavel", "#4ECDC4", "👸"),
    ("Ritsu", "#95E1D3", "🧙"),
    ("Jessica", "#F38181", "💃"),
    ("Eludia", "#AA96DA", "✨"),
    ("Narsha", "#FCBAD3", "🌙"),
    ("Viva", "#A8E6CF", "🎭"),
    ("Talisman", "#FFD3B6", "📿"),
    ("Vanessa", "#FFAAA5", "👑"),
    ("Galion", "#FF8B94", "⚔️"),
    ("Clara", "#B4A7D6", "💎"),
    ("Salah", "#73A1BD", "🗡️"),
    ("Akroma", "#5D737E", "🛡️"),
    ("Herteit", "#C06C84", "🔥"),
    ("Elena", "#6C5B7B", "🌟"),
    ("Zerath", "#355C7D", "⚡"),
    ("Gojo Light", "#2A9D8F", "🔮"),
    ("Craka", "#E76F51", "😈"),
    ("Celia", "#F4A261", "🌸"),
    ("Lucifer", "#E9C46A", "👿"),
    ("Nephthys", "#2A9D8F", "🪶"),
    ("Gurkha", "#264653", "🗡️"),
    ("Giana", "#E76F51", "🎵"),
    ("Ian", "#F4A261", "⚔️"),
    ("Grogen", "#E9C46A", "🍺"),
    ("Ariana", "#2A9D8F", "💒"),
    ("Wolyung", "#264653", "🐉"),
    ("Nigong", "#E76F51", "🌊"),
    ("Velaksa", "#F4A261", "🧛"),
    ("Benedict", "#E9C46A", "🤖"),
    ("Leona", "#2A9D8F", "🦁"),
    ("Inosuke Light", "#264653", "😤"),
    ("Miruel", "#E76F51", "🦄"),
    ("Graciah", "#F4A261", "⚖️"),
    ("Reine", "#E9C46A", "👑"),
    ("Valantis", "#2A9D8F", "💪"),
    ("Shan", "#264653", "🌪️"),
    ("SZL", "#E76F51", "🐉"),
    ("Jin Dark", "#F4A261", "👹"),
    ("Shazam", "#E9C46A", "⚡"),
    ("Audrey", "#2A9D8F", "🎀"),
    ("Giselle", "#264653", "❄️"),
    ("Belzebuth", "#E76F51", "😈"),
    ("Woonsa", "#F4A261", "🌪️"),
    ("Pater", "#E9C46A", "👴"),
    ("Veronica", "#2A9D8F", "💕"),
    ("Eleanor", "#264653", "👸"),
    ("Han", "#E76F51", "🏃"),
    ("Woosa", "#F4A261", "🌊"),
    ("Zenitsu Dark", "#E9C46A", "⚡"),
    ("Phœnix Dark", "#2A9D8F", "🔥"),
    ("N1X", "#264653", "🤖"),
    ("Sylvia", "#E76F51", "🧙‍♀️"),
    ("Nina Light", "#F4A261", "👧"),
    ("Geldnir", "#E9C46A", "🪨"),
    ("Berghild", "#2A9D8F", "👱"),
    ("Trinité", "#264653", "👼"),
    ("Seimei", "#E76F51", "🌸"),
    ("Douman", "#F4A261", "😈"),
    ("Alexandra", "#E9C46A", "👰"),
    ("Mannanan", "#2A9D8F", "⚔️"),
    ("Pudding Light", "#264653", "🍮"),
    ("Kiki", "#E76F51", "🐈"),
    ("Lydia", "#F4A261", "🎬"),
    ("Yuji Dark", "#E9C46A", "💀"),
    ("Nicki", "#2A9D8F", "💃"),
    ("Hilda", "#264653", "⛸️"),
    ("Lora", "#E76F51", "🐉"),
    ("Cadiz", "#F4A261", "🌊"),
    ("Hylius", "#E9C46A", "🔱"),
    ("Maxi", "#2A9D8F", "💪"),
    ("Pontos", "#264653", "👹"),
    ("Laima", "#E76F51", "😊"),
    ("Nobara Light", "#F4A261", "🎀"),
    ("Craig", "#E9C46A", "🔨"),
    ("Groa", "#2A9D8F", "🧙"),
    ("Elenoa", "#264653", "🦄"),
    ("Yeonhong", "#E76F51", "🌺"),
    ("Sigrid", "#F4A261", "❄️"),
    ("Pudding Dark", "#E9C46A", "🍮"),
    ("Xiana", "#2A9D8F", "🐺"),
    ("Thebae", "#264653", "🧟"),
    ("S3lver", "#E76F51", "⚔️"),
    ("Hyllus", "#F4A261", "🕷️"),
    ("Euldong", "#E9C46A", "🦾"),
    ("Lars", "#2A9D8F", "🐺"),
    ("Nezuko Dark", "#264653", "👹"),
    ("Kovarcy", "#E76F51", "🧬"),
    ("Fermion", "#F4A261", "⚛️"),
    ("Gisèle", "#E9C46A", "💎"),
    ("Destiny", "#2A9D8F", "✨"),
    ("Devraja", "#264653", "🐉"),
];

lazy_static::lazy_static! {
    static ref PLACEHOLDER_TABLE: HashMap<String, Placeholder> = PLACEHOLDERS
        .iter()
        .map(|&(name, color, emoji)| (name.to_lowercase(), Placeholder { color, emoji }))
        .collect();
}

/// 名前からプレースホルダを引く（大文字小文字・2A表記は無視）
pub fn placeholder_for(name: &str) -> Option<Placeholder> {
    let key = crate::search::availability_key(name);
    PLACEHOLDER_TABLE.get(&key).copied()
}

/// プレースホルダ画像のData URL（SVG, base64）
pub fn placeholder_image(name: &str) -> Option<String> {
    placeholder_for(name).map(|p| {
        let svg = format!(
            concat!(
                r#"<svg width="80" height="80" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 80 80">"#,
                r#"<rect width="80" height="80" fill="{}" rx="6"/>"#,
                r#"<text x="40" y="45" font-size="40" text-anchor="middle" dominant-baseline="middle" fill="white" font-family="Arial, sans-serif">{}</text>"#,
                "</svg>"
            ),
            p.color, p.emoji
        );
        format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
    })
}
