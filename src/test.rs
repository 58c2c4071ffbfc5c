#[cfg(test)]
pub mod test {
    use anyhow::Result;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    use crate::agent::{Agent, MinimaxAgent, RandomAgent};
    use crate::arena::{play_game, run_series};
    use crate::board::{check_move_status, Board, Cell, GameState, MoveError, Player};
    use crate::evaluation::{evaluate, score_window};
    use crate::solver::{choose_move, Role, Solver, INFINITY, NEG_INFINITY};
    use crate::{HEIGHT, WIDTH};

    /// Builds a board from rows given bottom row first, 'X' for player one,
    /// 'O' for player two and '.' for empty cells
    fn from_rows(rows: &[&str]) -> Board {
        let mut board = Board::new();
        for (row, line) in rows.iter().enumerate() {
            for (column, tile) in line.chars().enumerate() {
                let player = match tile {
                    'X' => Player::One,
                    'O' => Player::Two,
                    _ => continue,
                };
                assert_eq!(board.drop_piece(column, player), row, "floating tile in test board");
            }
        }
        board
    }

    fn random_position(rng: &mut StdRng, max_moves: usize) -> Board {
        let mut board = Board::new();
        let mut player = Player::One;
        for _ in 0..max_moves {
            if board.is_terminal() {
                break;
            }
            let column = *board.legal_columns().choose(rng).unwrap();
            board.drop_piece(column, player);
            player = player.opponent();
        }
        board
    }

    /// Plain minimax without pruning, scoring leaves for `player` like `Solver`
    fn full_width(board: &Board, depth: usize, role: Role, player: Player) -> (Option<usize>, i32) {
        if depth == 0 || board.is_terminal() {
            return (None, evaluate(board, player));
        }
        let mover = if role == Role::Maximize { player } else { player.opponent() };
        let next_role = if role == Role::Maximize { Role::Minimize } else { Role::Maximize };

        let mut best = None;
        let mut value = if role == Role::Maximize { NEG_INFINITY } else { INFINITY };
        for column in board.legal_columns() {
            let mut next = *board;
            next.drop_piece(column, mover);
            let (_, score) = full_width(&next, depth - 1, next_role, player);
            let better = match role {
                Role::Maximize => score > value,
                Role::Minimize => score < value,
            };
            if better {
                value = score;
                best = Some(column);
            }
        }
        (best, value)
    }

    #[test]
    pub fn gravity_and_legality() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let mut board = Board::new();
            let mut player = Player::One;
            while !board.is_terminal() {
                let legal = board.legal_columns();
                for column in 0..WIDTH {
                    assert_eq!(board.playable(column), legal.contains(&column));
                }
                assert!(legal.windows(2).all(|pair| pair[0] < pair[1]));

                board.drop_piece(*legal.choose(&mut rng).unwrap(), player);
                player = player.opponent();

                for column in 0..WIDTH {
                    let height = (0..HEIGHT)
                        .take_while(|&row| !board.get(row, column).is_empty())
                        .count();
                    assert!((height..HEIGHT).all(|row| board.get(row, column).is_empty()));
                }
            }
        }
    }

    #[test]
    pub fn drop_lands_on_lowest_empty_row() {
        let mut board = Board::new();
        assert_eq!(board.drop_piece(2, Player::One), 0);
        assert_eq!(board.drop_piece(2, Player::Two), 1);
        assert_eq!(board.drop_piece(3, Player::Two), 0);
        assert_eq!(board.get(1, 2), Cell::PlayerTwo);
        assert_eq!(board.num_moves(), 3);
    }

    #[test]
    #[should_panic(expected = "full column")]
    pub fn drop_into_full_column_panics() {
        let mut board = Board::from_moves("111111").unwrap();
        board.drop_piece(0, Player::One);
    }

    #[test]
    pub fn full_column_is_not_legal() -> Result<()> {
        let board = Board::from_moves("111111")?;
        assert!(!board.playable(0));
        assert_eq!(board.legal_columns(), vec![1, 2, 3, 4, 5, 6]);
        assert!(Board::from_moves("1111111").is_err());
        assert!(Board::from_moves("18").is_err());
        Ok(())
    }

    #[test]
    pub fn four_in_a_row_each_orientation() {
        let horizontal = from_rows(&["OXXXXOO"]);
        let vertical = from_rows(&["..X...O", "..X...O", "..X...O", "..X...."]);
        let rising = from_rows(&["XOOX...", ".XOO...", "..XO...", "...X..."]);
        let falling = from_rows(&["...XOOX", "...OOX.", "...OX..", "...X..."]);

        for board in [horizontal, vertical, rising, falling].iter() {
            assert!(board.has_four_in_a_row(Player::One), "\n{}", board);
            assert!(!board.has_four_in_a_row(Player::Two), "\n{}", board);
            assert!(board.is_terminal());
            assert_eq!(board.state(), GameState::PlayerOneWin);
        }

        let three = from_rows(&["XXX.OOO"]);
        assert!(!three.has_four_in_a_row(Player::One));
        assert!(!three.has_four_in_a_row(Player::Two));
        assert_eq!(three.state(), GameState::Playing);
    }

    #[test]
    pub fn full_board_without_line_is_draw() {
        let board = from_rows(&[
            "XOXOXOX", "XOXOXOX", "OXOXOXO", "OXOXOXO", "XOXOXOX", "XOXOXOX",
        ]);
        assert!(board.is_full());
        assert!(board.legal_columns().is_empty());
        assert!(!board.has_four_in_a_row(Player::One));
        assert!(!board.has_four_in_a_row(Player::Two));
        assert!(board.is_terminal());
        assert_eq!(board.state(), GameState::Draw);
    }

    #[test]
    pub fn window_count() {
        // 24 horizontal, 21 vertical, 12 per diagonal
        assert_eq!(Board::new().windows().count(), 69);
    }

    #[test]
    pub fn move_status() -> Result<()> {
        let board = Board::from_moves("333333")?;

        assert_eq!(check_move_status(&board, "4"), Ok(4));
        assert_eq!(check_move_status(&board, " 0 \n"), Ok(0));
        assert_eq!(check_move_status(&board, "6.0"), Ok(6));
        assert_eq!(check_move_status(&board, "four"), Err(MoveError::WrongType));
        assert_eq!(check_move_status(&board, ""), Err(MoveError::WrongType));
        assert_eq!(check_move_status(&board, "NaN"), Err(MoveError::NotInteger));
        assert_eq!(check_move_status(&board, "nan"), Err(MoveError::NotInteger));
        assert_eq!(check_move_status(&board, "inf"), Err(MoveError::NotInteger));
        assert_eq!(check_move_status(&board, "-inf"), Err(MoveError::NotInteger));
        assert_eq!(check_move_status(&board, "2.5"), Err(MoveError::NotInteger));
        assert_eq!(check_move_status(&board, "7"), Err(MoveError::OutOfBounds));
        assert_eq!(check_move_status(&board, "-1"), Err(MoveError::OutOfBounds));
        assert_eq!(check_move_status(&board, "2"), Err(MoveError::FullColumn));

        assert_eq!(MoveError::FullColumn.to_string(), "Selected column is full.");
        Ok(())
    }

    #[test]
    pub fn pretty_print() -> Result<()> {
        let board = Board::from_moves("4453")?;
        let expected = "\
|==============|
|              |
|              |
|              |
|              |
|      O       |
|    O X X     |
|==============|
|0 1 2 3 4 5 6 |
";
        assert_eq!(board.to_string(), expected);
        assert_eq!(expected.parse::<Board>()?, board);
        Ok(())
    }

    #[test]
    pub fn parse_rejects_malformed_boards() {
        let floating = "\
|==============|
|              |
|              |
|              |
|              |
|      O       |
|    O   X     |
|==============|
|0 1 2 3 4 5 6 |
";
        assert!(floating.parse::<Board>().is_err());

        let unknown_tile = Board::new().to_string().replacen("|    ", "|  Z ", 1);
        assert!(unknown_tile.parse::<Board>().is_err());
        assert!("".parse::<Board>().is_err());
    }

    #[test]
    pub fn window_scores_are_ordered() {
        let (x, o, e) = (Cell::PlayerOne, Cell::PlayerTwo, Cell::Empty);

        let four = score_window(&[x, x, x, x], Player::One);
        let three = score_window(&[x, e, x, x], Player::One);
        let two = score_window(&[e, x, e, x], Player::One);
        let other = score_window(&[x, e, e, e], Player::One);

        assert_eq!((four, three, two, other), (100, 5, 2, 0));
        assert!(four > three && three > two && two > other);

        assert_eq!(score_window(&[o, o, e, o], Player::One), -4);
        assert_eq!(score_window(&[o, o, o, o], Player::One), 0);
        assert_eq!(score_window(&[x, x, o, e], Player::One), 0);
        assert_eq!(score_window(&[x, x, e, e], Player::Two), 0);
    }

    #[test]
    pub fn evaluation() {
        assert_eq!(evaluate(&Board::new(), Player::One), 0);

        let center = from_rows(&["...X..."]);
        assert_eq!(evaluate(&center, Player::One), 3);
        assert_eq!(evaluate(&center, Player::Two), 0);

        let three = from_rows(&["XXX...."]);
        assert_eq!(evaluate(&three, Player::One), 7);
        assert_eq!(evaluate(&three, Player::Two), -4);
    }

    #[test]
    pub fn zero_depth_returns_evaluation() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let board = random_position(&mut rng, 20);
            for &player in [Player::One, Player::Two].iter() {
                let mut solver = Solver::new(player);
                let result = solver.search(&board, 0, NEG_INFINITY, INFINITY, Role::Maximize);
                assert_eq!(result, (None, evaluate(&board, player)));
                assert_eq!(solver.node_count, 1);
            }
        }
    }

    #[test]
    pub fn terminal_boards_are_leaves() -> Result<()> {
        let draw = from_rows(&[
            "XOXOXOX", "XOXOXOX", "OXOXOXO", "OXOXOXO", "XOXOXOX", "XOXOXOX",
        ]);
        let mut solver = Solver::new(Player::Two);
        assert_eq!(solver.player(), Player::Two);
        assert_eq!(solver.solve(&draw, 4), (None, evaluate(&draw, Player::Two)));

        let won = from_rows(&["XXXX...", "OOO...."]);
        let mut solver = Solver::new(Player::One);
        assert_eq!(solver.solve(&won, 4), (None, 106));

        // no search move, so the first legal column is played
        assert_eq!(choose_move(&won, Player::One, 4), 0);
        Ok(())
    }

    #[test]
    pub fn center_opening() {
        let mut solver = Solver::new(Player::One);
        let (best, score) = solver.search(&Board::new(), 1, NEG_INFINITY, INFINITY, Role::Maximize);
        assert_eq!(best, Some(3));
        assert_eq!(score, 3);
        assert_eq!(solver.node_count, 1 + WIDTH);
    }

    #[test]
    pub fn completes_open_three() {
        let board = from_rows(&["XXX....", "OO....."]);
        for depth in 1..=4 {
            let mut solver = Solver::new(Player::One);
            assert_eq!(solver.solve(&board, depth), (Some(3), 110), "depth {}", depth);
            assert_eq!(choose_move(&board, Player::One, depth), 3);
        }
    }

    #[test]
    pub fn leaves_scored_for_root_player() {
        // player two threatens column 6, but a completed opponent line costs
        // nothing when scored for player one, so the threat goes unblocked
        let board = from_rows(&["X.X...O", "......O", "......O"]);
        let mut solver = Solver::new(Player::One);
        assert_eq!(solver.solve(&board, 2), (Some(3), 1));
    }

    #[test]
    pub fn pruning_preserves_choice() {
        let mut rng = StdRng::seed_from_u64(1234);
        for _ in 0..40 {
            let board = random_position(&mut rng, 20);
            for depth in 1..=4 {
                for &player in [Player::One, Player::Two].iter() {
                    let mut solver = Solver::new(player);
                    let pruned = solver.solve(&board, depth);
                    let unpruned = full_width(&board, depth, Role::Maximize, player);
                    assert_eq!(pruned, unpruned, "depth {} for {:?}\n{}", depth, player, board);
                }
            }
        }
    }

    #[test]
    pub fn pruning_saves_nodes() {
        let mut solver = Solver::new(Player::One);
        solver.solve(&Board::new(), 4);
        // an unpruned depth 4 search visits 1 + 7 + 49 + 343 + 2401 nodes
        assert!(solver.node_count < 2801);
    }

    #[test]
    pub fn random_agent_plays_legal_columns() -> Result<()> {
        let board = Board::from_moves("111111777777")?;
        let mut agent = RandomAgent::with_seed(3);
        for _ in 0..100 {
            let column = agent.generate_move(&board, Player::One);
            assert!(board.legal_columns().contains(&column));
        }
        assert_eq!(agent.name(), "Random");
        Ok(())
    }

    #[test]
    pub fn minimax_agent() -> Result<()> {
        let mut agent = MinimaxAgent::default();
        assert_eq!(agent.depth, crate::DEFAULT_SEARCH_DEPTH);
        assert_eq!(agent.generate_move(&Board::from_moves("112233")?, Player::One), 3);
        assert_eq!(agent.name(), "Minimax");
        Ok(())
    }

    struct Stubborn;

    impl Agent for Stubborn {
        fn generate_move(&mut self, _board: &Board, _player: Player) -> usize {
            0
        }

        fn name(&self) -> &str {
            "Stubborn"
        }
    }

    #[test]
    pub fn games_run_to_the_end() -> Result<()> {
        let (state, board) = play_game(&mut MinimaxAgent::new(2), &mut RandomAgent::with_seed(9))?;
        assert!(board.is_terminal());
        assert_eq!(state, board.state());
        assert_ne!(state, GameState::Playing);

        // column 0 fills after six alternating tiles without a line
        assert!(play_game(&mut Stubborn, &mut Stubborn).is_err());
        Ok(())
    }

    #[test]
    pub fn series_totals() -> Result<()> {
        let result = run_series(6, 2, 11, false)?;
        assert_eq!(result.games(), 6);
        Ok(())
    }
}
