use card_utils::{Rank, Suit};

pub const CARD_WIDTH: u32 = 228;
pub const CARD_HEIGHT: u32 = 312;

const FONT_FAMILY: &str = "'Pretendard','Inter','Noto Sans','Noto Sans KR',system-ui,sans-serif";

/// Fill colours for one suit: frame fill, frame stroke, and ink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub main: &'static str,
    pub accent: &'static str,
    pub text: &'static str,
}

pub fn palette(suit: Suit) -> Palette {
    match suit {
        Suit::Spades => Palette {
            main: "#0f1a2a",
            accent: "#122a46",
            text: "#0d1a2b",
        },
        Suit::Hearts => Palette {
            main: "#fcf2f4",
            accent: "#ffe5ea",
            text: "#d22f46",
        },
        Suit::Diamonds => Palette {
            main: "#fcf8f2",
            accent: "#ffe6d0",
            text: "#d25e2f",
        },
        Suit::Clubs => Palette {
            main: "#f3f6fb",
            accent: "#dfe6f2",
            text: "#183025",
        },
    }
}

fn svg_open() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg width="{CARD_WIDTH}" height="{CARD_HEIGHT}" viewBox="0 0 {CARD_WIDTH} {CARD_HEIGHT}" fill="none" xmlns="http://www.w3.org/2000/svg">"#
    )
}

/// One card face. The corner index is drawn once and then repeated rotated half a turn
/// about the card's centre.
pub fn card_svg(rank: Rank, suit: Suit) -> String {
    let Palette { main, accent, text } = palette(suit);
    let label = rank.label();
    let symbol = suit.symbol();
    let (cx, cy) = (CARD_WIDTH / 2, CARD_HEIGHT / 2);
    let corner = format!(
        r#"    <text x="28" y="58" font-size="48" font-weight="700">{label}</text>
    <text x="28" y="104" font-size="40" font-weight="600">{symbol}</text>"#
    );

    format!(
        r##"{open}
  <rect width="{CARD_WIDTH}" height="{CARD_HEIGHT}" rx="20" fill="#ffffff"/>
  <rect x="10" y="10" width="208" height="292" rx="16" fill="{main}" stroke="{accent}" stroke-width="4"/>
  <g fill="{text}" font-family="{FONT_FAMILY}">
{corner}
  </g>
  <g fill="{text}" font-family="{FONT_FAMILY}" transform="rotate(180 {cx} {cy})">
{corner}
  </g>
  <text x="{cx}" y="176" text-anchor="middle" font-size="132" font-weight="600" fill="{text}" font-family="{FONT_FAMILY}">{symbol}</text>
</svg>"##,
        open = svg_open(),
    )
}

pub fn back_svg() -> String {
    format!(
        r##"{open}
  <rect width="{CARD_WIDTH}" height="{CARD_HEIGHT}" rx="20" fill="#0c1a3a"/>
  <rect x="14" y="14" width="200" height="284" rx="18" fill="#103269" stroke="#1a4c99" stroke-width="4"/>
  <g stroke="#6db0ff" stroke-width="3" opacity="0.65">
    <rect x="42" y="42" width="144" height="228" rx="16"/>
    {stripes}
  </g>
  <g fill="#89c5ff" opacity="0.9">
    <circle cx="114" cy="156" r="54" fill="#163f7a" stroke="#89c5ff" stroke-width="4"/>
    <path d="M114 112l18 36h-36l18-36z" fill="#89c5ff"/>
    <circle cx="114" cy="156" r="12" fill="#0c1a3a"/>
  </g>
</svg>"##,
        open = svg_open(),
        stripes = [78, 120, 162, 204, 246]
            .iter()
            .map(|y| format!(r#"<path d="M57 {y}h114"/>"#))
            .collect::<String>(),
    )
}
