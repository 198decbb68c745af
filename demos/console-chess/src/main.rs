use netmate::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// One full screen of game state, ready to print.
///
/// `selected` is the picker's pending square, shown as a hint so the
/// player knows a destination pick is expected next.
fn render(view: &ClientView, selected: Option<Square>) -> String {
    let mut out = String::new();

    if view.link.is_closed() {
        out.push_str("[connection closed]\n");
    }

    out.push_str(&view.game.board.to_string());
    out.push('\n');

    let status = if view.game.status.is_empty() {
        "Waiting to start..."
    } else {
        &view.game.status
    };
    // "!!" is the console stand-in for the red invalid-move flash.
    if view.game.invalid_move {
        out.push_str(&format!("!! {status}\n"));
    } else {
        out.push_str(&format!("   {status}\n"));
    }

    if view.game.game_over {
        out.push_str("   Type \"new\" for a rematch.\n");
    } else {
        out.push_str(&format!(
            "   {} to move, {}\n",
            view.game.turn,
            moves_played(view.game.move_count)
        ));
        if let Some(sq) = selected {
            out.push_str(&format!(
                "   selected {sq}, pick a destination ({sq} again to cancel)\n"
            ));
        }
    }

    out
}

fn moves_played(n: u32) -> String {
    if n == 1 {
        "1 move played".to_owned()
    } else {
        format!("{n} moves played")
    }
}

// ---------------------------------------------------------------------------
// Input parsing
// ---------------------------------------------------------------------------

enum Input {
    /// One square: feed it to the picker.
    Pick(Square),
    /// A complete move in coordinate notation, e.g. `e2e4` or `e7e8q`.
    Play(MovePayload),
    NewGame,
    Quit,
    Help,
}

fn parse_input(line: &str) -> Result<Input, String> {
    let line = line.trim().to_ascii_lowercase();
    match line.as_str() {
        "new" => return Ok(Input::NewGame),
        "quit" | "exit" => return Ok(Input::Quit),
        "help" | "?" => return Ok(Input::Help),
        _ => {}
    }
    if !line.is_ascii() {
        return Err(format!("unrecognized input: {line:?} (try \"help\")"));
    }

    match line.len() {
        2 => {
            let sq = line
                .parse()
                .map_err(|_| format!("not a square: {line:?}"))?;
            Ok(Input::Pick(sq))
        }
        4 | 5 => {
            let from: Square = line[..2]
                .parse()
                .map_err(|_| format!("not a square: {:?}", &line[..2]))?;
            let to: Square = line[2..4]
                .parse()
                .map_err(|_| format!("not a square: {:?}", &line[2..4]))?;
            let mut mv = MovePayload::new(from, to);
            if line.len() == 5 {
                let c = line.as_bytes()[4] as char;
                let p = Promotion::from_char(c)
                    .ok_or_else(|| format!("not a promotion piece: {c:?}"))?;
                mv = mv.promoting(p);
            }
            Ok(Input::Play(mv))
        }
        _ => Err(format!("unrecognized input: {line:?} (try \"help\")")),
    }
}

const HELP: &str = "\
commands:
  e2        pick a square (pick a second square to move; same square cancels)
  e2e4      play a move directly
  e7e8q     play a move with a promotion piece (q, r, b, n)
  new       start a new game
  help      show this text
  quit      close the connection and exit";

// ---------------------------------------------------------------------------
// Client bootstrap
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "ws://127.0.0.1:8080".to_owned());

    println!("Connecting to game server...");
    let (mut client, mut view) =
        GameClient::connect::<RelayRules>(&url, ClientConfig::default()).await?;
    println!("Connected to {url}. Type \"help\" for commands.\n");
    client.new_game()?;

    let mut picker = MovePicker::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", render(&view.borrow().clone(), None));

    loop {
        tokio::select! {
            changed = view.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = view.borrow().clone();
                println!("{}", render(&snapshot, picker.pending()));
                if snapshot.link.is_closed() {
                    break;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_input(&line) {
                    Ok(Input::Pick(square)) => {
                        if let Some(mv) = picker.select(square) {
                            if let Err(e) = client.propose_move(mv) {
                                eprintln!("command failed: {e}");
                                break;
                            }
                        } else if let Some(pending) = picker.pending() {
                            println!("selected {pending}, pick a destination");
                        } else {
                            println!("selection cleared");
                        }
                    }
                    Ok(Input::Play(mv)) => {
                        picker.clear();
                        if let Err(e) = client.propose_move(mv) {
                            eprintln!("command failed: {e}");
                            break;
                        }
                    }
                    Ok(Input::NewGame) => {
                        picker.clear();
                        if let Err(e) = client.new_game() {
                            eprintln!("command failed: {e}");
                            break;
                        }
                    }
                    Ok(Input::Quit) => break,
                    Ok(Input::Help) => println!("{HELP}"),
                    Err(msg) => println!("{msg}"),
                }
            }
        }
    }

    client.shutdown().await?;
    println!("bye");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::{SinkExt, StreamExt};
    use std::time::Duration;
    use tokio_tungstenite::tungstenite::Message;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn view(game: GameView) -> ClientView {
        ClientView {
            link: LinkState::Open,
            game,
        }
    }

    fn fresh_game() -> GameView {
        GameView {
            board: Board::initial(),
            turn: Side::White,
            status: String::new(),
            move_count: 0,
            invalid_move: false,
            game_over: false,
        }
    }

    // ---------------------------------------------------------------
    // Input parsing
    // ---------------------------------------------------------------

    #[test]
    fn test_parse_single_square() {
        assert!(matches!(parse_input("e2"), Ok(Input::Pick(s)) if s == sq("e2")));
        // Case and whitespace are forgiven.
        assert!(matches!(parse_input("  E2 "), Ok(Input::Pick(s)) if s == sq("e2")));
    }

    #[test]
    fn test_parse_coordinate_move() {
        let Ok(Input::Play(mv)) = parse_input("e2e4") else {
            panic!("e2e4 should parse as a move");
        };
        assert_eq!(mv, MovePayload::new(sq("e2"), sq("e4")));
    }

    #[test]
    fn test_parse_promotion_move() {
        let Ok(Input::Play(mv)) = parse_input("e7e8q") else {
            panic!("e7e8q should parse as a move");
        };
        assert_eq!(mv.promotion, Some(Promotion::Queen));
    }

    #[test]
    fn test_parse_keywords() {
        assert!(matches!(parse_input("new"), Ok(Input::NewGame)));
        assert!(matches!(parse_input("quit"), Ok(Input::Quit)));
        assert!(matches!(parse_input("exit"), Ok(Input::Quit)));
        assert!(matches!(parse_input("help"), Ok(Input::Help)));
        assert!(matches!(parse_input("?"), Ok(Input::Help)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_input("x9").is_err());
        assert!(parse_input("e2e9").is_err());
        assert!(parse_input("e7e8x").is_err());
        assert!(parse_input("castle kingside").is_err());
        assert!(parse_input("♞f3").is_err());
    }

    // ---------------------------------------------------------------
    // Rendering
    // ---------------------------------------------------------------

    #[test]
    fn test_render_placeholder_before_first_event() {
        let out = render(&view(fresh_game()), None);
        assert!(out.contains("Waiting to start..."));
        assert!(out.contains("White to move, 0 moves played"));
        assert!(!out.contains("connection closed"));
    }

    #[test]
    fn test_render_flash_marker() {
        let mut game = fresh_game();
        game.status = "Invalid move attempted!".to_owned();
        game.invalid_move = true;
        let out = render(&view(game), None);
        assert!(out.contains("!! Invalid move attempted!"));
    }

    #[test]
    fn test_render_game_over_hides_turn_line() {
        let mut game = fresh_game();
        game.status = "Game Over!".to_owned();
        game.game_over = true;
        let out = render(&view(game), None);
        assert!(out.contains("Game Over!"));
        assert!(out.contains("rematch"));
        assert!(!out.contains("to move"));
    }

    #[test]
    fn test_render_selected_square_hint() {
        let out = render(&view(fresh_game()), Some(sq("e2")));
        assert!(out.contains("selected e2"));
    }

    #[test]
    fn test_render_closed_link_banner() {
        let v = ClientView {
            link: LinkState::Closed,
            game: fresh_game(),
        };
        let out = render(&v, None);
        assert!(out.contains("[connection closed]"));
    }

    #[test]
    fn test_render_singular_move_count() {
        let mut game = fresh_game();
        game.move_count = 1;
        game.turn = Side::Black;
        game.status = "Move 1: e2 to e4".to_owned();
        let out = render(&view(game), None);
        assert!(out.contains("Black to move, 1 move played"));
    }

    // ---------------------------------------------------------------
    // End to end against a scripted server
    // ---------------------------------------------------------------

    #[tokio::test]
    async fn test_renders_a_full_scripted_game() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            // Wait for init_game from the client, then play a scholar's
            // mate and hang up.
            let _ = ws.next().await.unwrap().unwrap();
            for frame in [
                r#"{"type":"init_game"}"#,
                r#"{"type":"move","payload":{"from":"e2","to":"e4"}}"#,
                r#"{"type":"move","payload":{"from":"e7","to":"e5"}}"#,
                r#"{"type":"move","payload":{"from":"f1","to":"c4"}}"#,
                r#"{"type":"move","payload":{"from":"b8","to":"c6"}}"#,
                r#"{"type":"move","payload":{"from":"d1","to":"h5"}}"#,
                r#"{"type":"move","payload":{"from":"g8","to":"f6"}}"#,
                r#"{"type":"move","payload":{"from":"h5","to":"f7"}}"#,
                r#"{"type":"game_over"}"#,
            ] {
                ws.send(Message::Text(frame.into())).await.unwrap();
            }
            ws.close(None).await.unwrap();
        });

        let (client, mut view) = GameClient::connect::<RelayRules>(
            &format!("ws://{addr}"),
            ClientConfig::default(),
        )
        .await
        .expect("should connect");
        client.new_game().unwrap();

        let mut last = view.borrow().clone();
        while !(last.game.game_over && last.link.is_closed()) {
            tokio::time::timeout(Duration::from_secs(5), view.changed())
                .await
                .expect("scripted game should progress")
                .expect("driver should be alive");
            last = view.borrow().clone();
        }

        let out = render(&last, None);
        assert!(out.contains("[connection closed]"));
        assert!(out.contains("Game Over!"));
        // The queen landed on f7 and took the pawn.
        assert_eq!(
            last.game.board.get(sq("f7")),
            Some(Piece {
                side: Side::White,
                kind: PieceKind::Queen
            })
        );
        assert_eq!(last.game.move_count, 7);
    }
}
