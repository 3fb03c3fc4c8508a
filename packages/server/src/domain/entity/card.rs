//! Point cards.

/// Name of the card that nullifies its holder's best other card at scoring
pub const CRASH_CARD_NAME: &str = "大暴落";

/// A point card. The deck is exactly [`CARD_CATALOG`], one copy each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub name: &'static str,
    pub value: i64,
    pub image: &'static str,
}

impl Card {
    const fn new(name: &'static str, value: i64, image: &'static str) -> Self {
        Self { name, value, image }
    }

    pub fn is_crash(&self) -> bool {
        self.name == CRASH_CARD_NAME
    }
}

pub const CARD_CATALOG: [Card; 10] = [
    Card::new("クルーズ船", 600, "クルーズ船.png"),
    Card::new("ダイヤ", 800, "ダイヤ.png"),
    Card::new("タワーマンション", 700, "タワーマンション.png"),
    Card::new("プライベートアイランド", 1000, "プライベートアイランド.png"),
    Card::new("ロケット", 900, "ロケット.png"),
    Card::new("ワイン", 200, "ワイン.png"),
    Card::new("絵画", 400, "絵画.png"),
    Card::new("空中庭園都市", 500, "空中庭園都市.png"),
    Card::new("未公開株", 300, "未公開株.png"),
    Card::new(CRASH_CARD_NAME, -500, "大暴落.png"),
];
