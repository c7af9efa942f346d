//! Requests for the game server's REST endpoints. Every argument travels as a query
//! parameter; optional ones are left out so the server applies its own default.

use crate::api::ApiRequest;

pub mod blackjack {
    use super::ApiRequest;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum SoloAction {
        Hit,
        Stand,
        Double,
        Surrender,
        Split,
    }

    impl SoloAction {
        fn path(self) -> &'static str {
            match self {
                SoloAction::Hit => "/blackjack/solo/hit",
                SoloAction::Stand => "/blackjack/solo/stand",
                SoloAction::Double => "/blackjack/solo/double",
                SoloAction::Surrender => "/blackjack/solo/surrender",
                SoloAction::Split => "/blackjack/solo/split",
            }
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum RoomAction {
        Hit,
        Stand,
    }

    /// `decks` defaults to 4 on the server.
    pub fn solo_start(user: &str, bet: u32, decks: Option<u32>) -> ApiRequest {
        ApiRequest::post("/blackjack/solo/start")
            .param("user", user)
            .param("bet", bet)
            .param_opt("decks", decks)
    }

    pub fn solo_action(user: &str, action: SoloAction) -> ApiRequest {
        ApiRequest::post(action.path()).param("user", user)
    }

    pub fn room_start(room_id: &str, host: &str, bet: u32, decks: Option<u32>) -> ApiRequest {
        ApiRequest::post("/blackjack/room/start")
            .param("roomId", room_id)
            .param("host", host)
            .param("bet", bet)
            .param_opt("decks", decks)
    }

    /// Other players' hole cards come back as `BACK` while the round is running.
    pub fn room_state(room_id: &str, viewer: &str) -> ApiRequest {
        ApiRequest::get("/blackjack/room/state")
            .param("roomId", room_id)
            .param("viewer", viewer)
    }

    pub fn room_action(room_id: &str, user: &str, action: RoomAction) -> ApiRequest {
        let path = match action {
            RoomAction::Hit => "/blackjack/room/hit",
            RoomAction::Stand => "/blackjack/room/stand",
        };
        ApiRequest::post(path)
            .param("roomId", room_id)
            .param("user", user)
    }
}

pub mod baccarat {
    use super::ApiRequest;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum MainBet {
        Player,
        Banker,
        Tie,
    }

    impl MainBet {
        pub fn as_str(self) -> &'static str {
            match self {
                MainBet::Player => "PLAYER",
                MainBet::Banker => "BANKER",
                MainBet::Tie => "TIE",
            }
        }
    }

    /// A stake on the main outcome plus optional side bets, each side bet costing `amount` again.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Bet {
        pub amount: u32,
        pub main: MainBet,
        pub pair_player: bool,
        pub pair_banker: bool,
        pub super6: bool,
    }

    impl Bet {
        pub fn new(amount: u32, main: MainBet) -> Self {
            Self {
                amount,
                main,
                pair_player: false,
                pair_banker: false,
                super6: false,
            }
        }

        /// What the bet costs up front, or `None` if that doesn't fit in a `u32`.
        pub fn total_stake(&self) -> Option<u32> {
            let side_bets = [self.pair_player, self.pair_banker, self.super6]
                .into_iter()
                .filter(|placed| *placed)
                .count() as u32;
            self.amount.checked_mul(1 + side_bets)
        }
    }

    /// `commission` defaults to true and `decks` to 6 on the server.
    pub fn solo_bet(user: &str, bet: &Bet, commission: Option<bool>, decks: Option<u32>) -> ApiRequest {
        ApiRequest::post("/baccarat/solo/bet")
            .param("user", user)
            .param("amount", bet.amount)
            .param("main", bet.main.as_str())
            .param("pairPlayer", bet.pair_player)
            .param("pairBanker", bet.pair_banker)
            .param("super6", bet.super6)
            .param_opt("commission", commission)
            .param_opt("decks", decks)
    }

    // the room endpoint spells the pair flags differently from the solo one
    pub fn room_bet(room_id: &str, user: &str, bet: &Bet, decks: Option<u32>) -> ApiRequest {
        ApiRequest::post("/baccarat/room/bet")
            .param("roomId", room_id)
            .param("user", user)
            .param("main", bet.main.as_str())
            .param("amount", bet.amount)
            .param("pairP", bet.pair_player)
            .param("pairB", bet.pair_banker)
            .param("super6", bet.super6)
            .param_opt("decks", decks)
    }

    pub fn room_deal(room_id: &str, commission: Option<bool>) -> ApiRequest {
        ApiRequest::post("/baccarat/room/deal")
            .param("roomId", room_id)
            .param_opt("commission", commission)
    }

    pub fn room_state(room_id: &str) -> ApiRequest {
        ApiRequest::get("/baccarat/room/state").param("roomId", room_id)
    }
}

pub mod seven {
    use super::ApiRequest;

    /// Blank names are dropped; the server would drop them anyway.
    pub fn start(room_id: &str, users: &[&str], ante: u32) -> ApiRequest {
        let users = users
            .iter()
            .map(|user| user.trim())
            .filter(|user| !user.is_empty())
            .collect::<Vec<_>>()
            .join(",");
        ApiRequest::post("/seven/start")
            .param("roomId", room_id)
            .param("users", users)
            .param("ante", ante)
    }

    pub fn state(room_id: &str, viewer: &str) -> ApiRequest {
        ApiRequest::get("/seven/state")
            .param("roomId", room_id)
            .param("viewer", viewer)
    }

    pub fn bet(room_id: &str, user: &str, amount: u32) -> ApiRequest {
        ApiRequest::post("/seven/bet")
            .param("roomId", room_id)
            .param("user", user)
            .param("amount", amount)
    }

    pub fn call(room_id: &str, user: &str) -> ApiRequest {
        player_action("/seven/call", room_id, user)
    }

    pub fn check(room_id: &str, user: &str) -> ApiRequest {
        player_action("/seven/check", room_id, user)
    }

    pub fn fold(room_id: &str, user: &str) -> ApiRequest {
        player_action("/seven/fold", room_id, user)
    }

    /// Deals the next street.
    pub fn next(room_id: &str) -> ApiRequest {
        ApiRequest::post("/seven/next").param("roomId", room_id)
    }

    fn player_action(path: &str, room_id: &str, user: &str) -> ApiRequest {
        ApiRequest::post(path)
            .param("roomId", room_id)
            .param("user", user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;

    #[test]
    fn test_blackjack_solo_start() {
        let request = blackjack::solo_start("alice", 50, None);
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/blackjack/solo/start");
        assert_eq!(
            request.query,
            vec![
                ("user".to_string(), "alice".to_string()),
                ("bet".to_string(), "50".to_string()),
            ]
        );
        assert_eq!(
            blackjack::solo_start("alice", 50, Some(2)).query_value("decks"),
            Some("2")
        );
    }

    #[test]
    fn test_blackjack_actions() {
        let request = blackjack::solo_action("bob", blackjack::SoloAction::Surrender);
        assert_eq!(request.path, "/blackjack/solo/surrender");
        assert_eq!(request.query_value("user"), Some("bob"));

        let request = blackjack::room_action("r7", "bob", blackjack::RoomAction::Stand);
        assert_eq!(request.path, "/blackjack/room/stand");
        assert_eq!(request.query_value("roomId"), Some("r7"));

        let state = blackjack::room_state("r7", "bob");
        assert_eq!(state.method, Method::Get);
        assert_eq!(state.query_value("viewer"), Some("bob"));
    }

    #[test]
    fn test_baccarat_param_spelling() {
        let mut bet = baccarat::Bet::new(10, baccarat::MainBet::Banker);
        bet.pair_player = true;

        let solo = baccarat::solo_bet("carol", &bet, Some(false), None);
        assert_eq!(solo.query_value("main"), Some("BANKER"));
        assert_eq!(solo.query_value("pairPlayer"), Some("true"));
        assert_eq!(solo.query_value("commission"), Some("false"));
        assert_eq!(solo.query_value("decks"), None);

        let room = baccarat::room_bet("r1", "carol", &bet, Some(8));
        assert_eq!(room.query_value("pairP"), Some("true"));
        assert_eq!(room.query_value("pairB"), Some("false"));
        assert_eq!(room.query_value("pairPlayer"), None);
        assert_eq!(room.query_value("decks"), Some("8"));
    }

    #[test]
    fn test_baccarat_total_stake() {
        let mut bet = baccarat::Bet::new(25, baccarat::MainBet::Tie);
        assert_eq!(bet.total_stake(), Some(25));
        bet.pair_banker = true;
        bet.super6 = true;
        assert_eq!(bet.total_stake(), Some(75));
    }

    #[test]
    fn test_baccarat_total_stake_overflow() {
        let mut bet = baccarat::Bet::new(u32::MAX / 2, baccarat::MainBet::Player);
        bet.pair_player = true;
        assert_eq!(bet.total_stake(), Some(u32::MAX - 1));

        bet.super6 = true;
        assert_eq!(bet.total_stake(), None);

        let all_in = baccarat::Bet::new(u32::MAX, baccarat::MainBet::Banker);
        assert_eq!(all_in.total_stake(), Some(u32::MAX));
    }

    #[test]
    fn test_seven_start_joins_users() {
        let request = seven::start("table", &["dave", " ", " erin "], 5);
        assert_eq!(request.path, "/seven/start");
        assert_eq!(request.query_value("users"), Some("dave,erin"));
        assert_eq!(request.query_value("ante"), Some("5"));
    }

    #[test]
    fn test_seven_player_actions() {
        for (request, path) in [
            (seven::call("t", "u"), "/seven/call"),
            (seven::check("t", "u"), "/seven/check"),
            (seven::fold("t", "u"), "/seven/fold"),
        ] {
            assert_eq!(request.method, Method::Post);
            assert_eq!(request.path, path);
            assert_eq!(request.query_value("user"), Some("u"));
        }
        assert_eq!(seven::next("t").query, vec![("roomId".to_string(), "t".to_string())]);
    }
}
