use crate::models::game::NewGame;

/// Starter catalog loaded by the `seed` binary into an empty database.
pub fn starter_catalog() -> Vec<NewGame> {
    [
        ("Roulette Live", "Evolution", "Live Casino"),
        ("Lightning Roulette", "Evolution", "Live Casino"),
        ("Blackjack VIP", "Evolution", "Table Games"),
        ("Infinite Blackjack", "Evolution", "Table Games"),
        ("Baccarat Control Squeeze", "Evolution", "Live Casino"),
        ("Sweet Bonanza", "Pragmatic Play", "Slots"),
        ("Gates of Olympus", "Pragmatic Play", "Slots"),
        ("The Dog House", "Pragmatic Play", "Slots"),
        ("Big Bass Bonanza", "Pragmatic Play", "Slots"),
        ("Wolf Gold", "Pragmatic Play", "Slots"),
        ("Starburst", "NetEnt", "Slots"),
        ("Gonzo's Quest", "NetEnt", "Slots"),
        ("Dead or Alive 2", "NetEnt", "Slots"),
        ("Book of Dead", "Play'n GO", "Slots"),
        ("Reactoonz", "Play'n GO", "Slots"),
        ("Fire Joker", "Play'n GO", "Slots"),
        ("Mega Moolah", "Microgaming", "Slots"),
        ("Immortal Romance", "Microgaming", "Slots"),
        ("Crazy Time", "Evolution", "Live Casino"),
        ("Monopoly Live", "Evolution", "Live Casino"),
        ("Dream Catcher", "Evolution", "Live Casino"),
        ("European Roulette", "NetEnt", "Table Games"),
        ("Classic Blackjack", "Microgaming", "Table Games"),
        ("Casino Hold'em", "Evolution", "Table Games"),
    ]
    .into_iter()
    .map(|(name, provider, category)| NewGame::new(name, provider, category))
    .collect()
}
