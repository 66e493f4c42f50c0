//! Tests for the public board operations and the reference check

#[cfg(test)]
mod tests {
    use exitfield::algorithm::board::Board;
    use exitfield::algorithm::operation::Operation;
    use exitfield::io::error::BoardError;

    const N: Option<u32> = None;

    fn field(board: &Board) -> Vec<Vec<Option<u32>>> {
        (0..board.height())
            .map(|y| {
                (0..board.width())
                    .map(|x| board.get_cost(x, y).unwrap())
                    .collect()
            })
            .collect()
    }

    fn scenario_board() -> Board {
        let mut board = Board::new(5, 5).unwrap();
        for (x, y) in [(1, 0), (2, 3), (4, 0)] {
            assert!(board.add_exit(x, y).unwrap());
        }
        for (x, y) in [(0, 3), (2, 1), (3, 2), (1, 3), (3, 3), (2, 4)] {
            assert!(board.add_obstacle(x, y).unwrap());
        }
        board
    }

    // Tests a fresh board has no exits, no obstacles and no costs
    // Verified by initializing the cost matrix with zeros
    #[test]
    fn test_new_board_is_unreached() {
        let board = Board::new(4, 3).unwrap();
        assert_eq!(board.width(), 4);
        assert_eq!(board.height(), 3);
        assert!(board.costs().iter().all(Option::is_none));
        assert!(board.exits().is_empty());
        assert!(board.obstacles().is_empty());
    }

    // Tests zero-sized boards are rejected
    // Verified by removing the dimension validation in the grid constructor
    #[test]
    fn test_new_rejects_empty_dimensions() {
        assert!(matches!(
            Board::new(0, 3),
            Err(BoardError::InvalidParameter {
                parameter: "width",
                ..
            })
        ));
        assert!(matches!(
            Board::new(3, 0),
            Err(BoardError::InvalidParameter {
                parameter: "height",
                ..
            })
        ));
    }

    // Tests a single exit on an open board yields Manhattan distances
    // Verified by using 8-connected neighbors in relaxation
    #[test]
    fn test_single_exit_manhattan_distances() {
        let mut board = Board::new(7, 7).unwrap();
        board.add_exit(5, 3).unwrap();

        assert_eq!(board.get_cost(6, 3).unwrap(), Some(1));
        assert_eq!(board.get_cost(6, 4).unwrap(), Some(2));
        assert_eq!(board.get_cost(0, 3).unwrap(), Some(5));
        assert_eq!(board.get_cost(2, 1).unwrap(), Some(5));
        for y in 0..7 {
            for x in 0..7 {
                let expected = (x as i64 - 5).unsigned_abs() + (y as i64 - 3).unsigned_abs();
                assert_eq!(board.get_cost(x, y).unwrap(), Some(expected as u32));
            }
        }
    }

    // Tests the mixed scenario produces the documented field
    // Verified by skipping reconvergence after add_obstacle
    #[test]
    fn test_scenario_field() {
        let board = scenario_board();
        assert_eq!(
            field(&board),
            vec![
                vec![Some(1), Some(0), Some(1), Some(1), Some(0)],
                vec![Some(2), Some(1), N, Some(2), Some(1)],
                vec![Some(3), Some(2), Some(1), N, Some(2)],
                vec![N, N, Some(0), N, Some(3)],
                vec![N, N, N, Some(5), Some(4)],
            ]
        );
        board.verify().unwrap();
    }

    // Tests removing an obstacle opens a shortcut and lowers costs behind it
    // Verified by leaving the reopened cell unreached instead of relaxing from it
    #[test]
    fn test_remove_obstacle_opens_shortcut() {
        let mut board = scenario_board();
        let before = field(&board);
        assert!(board.remove_obstacle(2, 4).unwrap());

        assert_eq!(board.get_cost(2, 4).unwrap(), Some(1));
        assert_eq!(board.get_cost(0, 4).unwrap(), Some(3));
        assert_eq!(board.get_cost(1, 4).unwrap(), Some(2));
        assert_eq!(board.get_cost(3, 4).unwrap(), Some(2));
        assert_eq!(board.get_cost(4, 4).unwrap(), Some(3));
        for y in 0..4 {
            for x in 0..5 {
                assert_eq!(board.get_cost(x, y).unwrap(), before[y][x]);
            }
        }
        board.verify().unwrap();
    }

    // Tests removing an exit reroutes its dependents through other exits
    // Verified by dropping the removed exit from the orphan list
    #[test]
    fn test_remove_exit_reroutes() {
        let mut board = scenario_board();
        assert!(board.remove_exit(2, 3).unwrap());

        assert_eq!(board.get_cost(2, 3).unwrap(), Some(4));
        assert_eq!(board.get_cost(2, 2).unwrap(), Some(3));
        assert_eq!(board.get_cost(3, 4).unwrap(), Some(5));
        assert_eq!(board.get_cost(4, 4).unwrap(), Some(4));
        for (x, y) in [
            (0, 3),
            (0, 4),
            (1, 3),
            (1, 4),
            (2, 1),
            (2, 4),
            (3, 2),
            (3, 3),
        ] {
            assert_eq!(board.get_cost(x, y).unwrap(), None, "({x}, {y})");
        }
        assert!(!board.is_exit(2, 3).unwrap());
        board.verify().unwrap();
    }

    // Tests removing the only exit leaves every cell unreachable
    // Verified by treating the removed exit as still settled at cost 0
    #[test]
    fn test_remove_last_exit_clears_field() {
        let mut board = Board::new(4, 4).unwrap();
        board.add_exit(1, 1).unwrap();
        board.add_obstacle(3, 3).unwrap();
        board.remove_exit(1, 1).unwrap();

        assert!(board.costs().iter().all(Option::is_none));
        board.verify().unwrap();
    }

    // Tests redundant transitions are reported and leave the board unchanged
    // Verified by removing the early returns for redundant calls
    #[test]
    fn test_redundant_transitions() {
        let mut board = scenario_board();
        let before = board.clone();

        assert!(!board.add_exit(1, 0).unwrap());
        assert!(!board.remove_exit(0, 0).unwrap());
        assert!(!board.add_obstacle(2, 1).unwrap());
        assert!(!board.remove_obstacle(0, 0).unwrap());
        assert_eq!(board, before);
    }

    // Tests an exit placed on an obstacle replaces it
    // Verified by skipping the unblock step in add_exit
    #[test]
    fn test_add_exit_on_obstacle() {
        let mut board = Board::new(3, 1).unwrap();
        board.add_obstacle(1, 0).unwrap();
        board.add_exit(1, 0).unwrap();

        assert!(board.is_exit(1, 0).unwrap());
        assert!(!board.is_obstacle(1, 0).unwrap());
        assert_eq!(board.get_cost(0, 0).unwrap(), Some(1));
        assert_eq!(board.get_cost(2, 0).unwrap(), Some(1));
    }

    // Tests an obstacle placed on an exit removes the exit
    // Verified by keeping cost 0 on the blocked cell
    #[test]
    fn test_add_obstacle_on_exit() {
        let mut board = Board::new(3, 1).unwrap();
        board.add_exit(0, 0).unwrap();
        board.add_obstacle(0, 0).unwrap();

        assert!(board.is_obstacle(0, 0).unwrap());
        assert!(!board.is_exit(0, 0).unwrap());
        assert!(board.exits().is_empty());
        assert_eq!(board.get_cost(2, 0).unwrap(), None);
    }

    // Tests a sealed-off pocket stays unreachable
    // Verified by seeding relaxation from every open cell
    #[test]
    fn test_sealed_pocket_is_unreachable() {
        let mut board = Board::new(5, 5).unwrap();
        for (x, y) in [(1, 0), (0, 1), (1, 2), (2, 1)] {
            board.add_obstacle(x, y).unwrap();
        }
        board.add_exit(4, 4).unwrap();

        assert_eq!(board.get_cost(1, 1).unwrap(), None);
        assert_eq!(board.get_cost(0, 0).unwrap(), None);
        assert_eq!(board.get_cost(4, 4).unwrap(), Some(0));
        board.verify().unwrap();
    }

    // Tests out-of-range coordinates fail without touching the board
    // Verified by removing the bounds check in add_exit
    #[test]
    fn test_out_of_range_rejected() {
        let mut board = scenario_board();
        let before = board.clone();

        let error = board.add_exit(5, 0).unwrap_err();
        assert!(matches!(
            error,
            BoardError::OutOfRange {
                position: [5, 0],
                dimensions: (5, 5)
            }
        ));
        assert!(board.add_obstacle(0, 9).is_err());
        assert!(board.remove_exit(7, 7).is_err());
        assert!(board.remove_obstacle(5, 5).is_err());
        assert!(board.get_cost(0, 5).is_err());
        assert_eq!(board, before);
    }

    // Tests exits and obstacles are listed in row-major order
    // Verified by iterating the cost matrix column-major
    #[test]
    fn test_exits_and_obstacles_row_major() {
        let board = scenario_board();
        assert_eq!(board.exits(), vec![[1, 0], [4, 0], [2, 3]]);
        assert_eq!(
            board.obstacles(),
            vec![[2, 1], [3, 2], [0, 3], [1, 3], [3, 3], [2, 4]]
        );
    }

    // Tests apply_all counts only the operations that changed the board
    // Verified by counting every operation
    #[test]
    fn test_apply_all_counts_changes() {
        let mut board = Board::new(3, 3).unwrap();
        let operations = [
            Operation::AddExit([0, 0]),
            Operation::AddExit([0, 0]),
            Operation::AddObstacle([1, 1]),
            Operation::RemoveObstacle([2, 2]),
        ];
        assert_eq!(board.apply_all(&operations).unwrap(), 2);
        board.verify().unwrap();
    }

    // Tests the reference recomputation matches the incremental field
    // Verified by treating obstacles as passable in the reference BFS
    #[test]
    fn test_recompute_reference_matches() {
        let board = scenario_board();
        assert_eq!(board.recompute_reference(), board.costs());
    }

    // Tests the text rendering of the scenario board
    // Verified by swapping the obstacle and unreachable markers
    #[test]
    fn test_display() {
        let board = scenario_board();
        assert_eq!(
            board.to_string(),
            "1 0 1 1 0\n2 1 # 2 1\n3 2 1 # 2\n# # 0 # 3\n— — # 5 4\n"
        );
    }
}
