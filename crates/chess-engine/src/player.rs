//! Per-side state, legality checks and move transitions.

use chess_core::geometry::NUM_TILES;
use chess_core::{File, Rank, Side, Square};

use crate::movegen::pawn_attack_squares;
use crate::{Board, BoardError, Move, MoveKind, Piece, Position};

/// What one side can do in a position, computed when the position is built.
#[derive(Debug, Clone)]
pub struct PlayerState {
    king: Piece,
    legal_moves: Vec<Move>,
    in_check: bool,
}

impl PlayerState {
    /// Derives a side's state from its own pseudo-legal moves and the
    /// opponent's.
    ///
    /// The king is in check when any opponent move lands on its square.
    /// Castling moves are appended to `own_moves` when available.
    pub(crate) fn new(
        board: &Board,
        king: Piece,
        own_moves: &[Move],
        opponent_moves: &[Move],
        opponent_pieces: &[Piece],
    ) -> Self {
        let in_check = opponent_moves
            .iter()
            .any(|m| m.destination() == king.square());

        let mut legal_moves = own_moves.to_vec();
        if !in_check {
            legal_moves.extend(castle_moves(board, &king, opponent_moves, opponent_pieces));
        }

        PlayerState {
            king,
            legal_moves,
            in_check,
        }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.king.side()
    }

    #[inline]
    pub fn king(&self) -> Piece {
        self.king
    }

    #[inline]
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    #[inline]
    pub fn is_in_check(&self) -> bool {
        self.in_check
    }
}

/// Which rook a castling move uses.
#[derive(Debug, Clone, Copy)]
enum Flank {
    King,
    Queen,
}

impl Flank {
    const fn rook_file(self) -> File {
        match self {
            Flank::King => File::H,
            Flank::Queen => File::A,
        }
    }

    /// Files strictly between king and rook.
    const fn between(self) -> &'static [File] {
        match self {
            Flank::King => &[File::F, File::G],
            Flank::Queen => &[File::B, File::C, File::D],
        }
    }

    /// Files the king passes over or lands on.
    const fn king_path(self) -> &'static [File] {
        match self {
            Flank::King => &[File::F, File::G],
            Flank::Queen => &[File::D, File::C],
        }
    }

    const fn king_destination(self) -> File {
        match self {
            Flank::King => File::G,
            Flank::Queen => File::C,
        }
    }

    const fn rook_destination(self) -> File {
        match self {
            Flank::King => File::F,
            Flank::Queen => File::D,
        }
    }

    const fn is_capable(self, king: &Piece) -> bool {
        match self {
            Flank::King => king.is_king_side_castle_capable(),
            Flank::Queen => king.is_queen_side_castle_capable(),
        }
    }

    const fn kind(self, rook: Piece, rook_destination: Square) -> MoveKind {
        match self {
            Flank::King => MoveKind::CastleKingSide {
                rook,
                rook_destination,
            },
            Flank::Queen => MoveKind::CastleQueenSide {
                rook,
                rook_destination,
            },
        }
    }
}

const fn home_square(side: Side, file: File) -> Square {
    match side {
        Side::White => Square::new(file, Rank::R1),
        Side::Black => Square::new(file, Rank::R8),
    }
}

fn castle_moves(
    board: &Board,
    king: &Piece,
    opponent_moves: &[Move],
    opponent_pieces: &[Piece],
) -> Vec<Move> {
    let side = king.side();
    if !king.is_first_move() || king.square() != home_square(side, File::E) {
        return Vec::new();
    }

    let attacked = attacked_squares(opponent_moves, opponent_pieces);
    [Flank::King, Flank::Queen]
        .into_iter()
        .filter(|flank| flank.is_capable(king))
        .filter_map(|flank| {
            let rook = board.piece_at(home_square(side, flank.rook_file()))?;
            if !rook.kind().is_rook() || rook.side() != side || !rook.is_first_move() {
                return None;
            }
            let blocked = flank
                .between()
                .iter()
                .any(|&file| board.is_occupied(home_square(side, file)));
            let unsafe_path = flank
                .king_path()
                .iter()
                .any(|&file| attacked[home_square(side, file).index() as usize]);
            if blocked || unsafe_path {
                return None;
            }
            let rook_destination = home_square(side, flank.rook_destination());
            Some(Move::new(
                *king,
                home_square(side, flank.king_destination()),
                flank.kind(rook, rook_destination),
            ))
        })
        .collect()
}

/// Squares the opponent attacks. Pawn pushes do not attack, so pawns
/// contribute their diagonals instead of their generated moves.
fn attacked_squares(opponent_moves: &[Move], opponent_pieces: &[Piece]) -> [bool; NUM_TILES] {
    let mut attacked = [false; NUM_TILES];
    for m in opponent_moves {
        if !m.moved_piece().kind().is_pawn() {
            attacked[m.destination().index() as usize] = true;
        }
    }
    for pawn in opponent_pieces.iter().filter(|p| p.kind().is_pawn()) {
        for square in pawn_attack_squares(pawn) {
            attacked[square.index() as usize] = true;
        }
    }
    attacked
}

/// One side of a [`Position`], borrowed from it.
#[derive(Debug, Clone, Copy)]
pub struct Player<'a> {
    position: &'a Position,
    state: &'a PlayerState,
}

impl<'a> Player<'a> {
    pub(crate) fn new(position: &'a Position, state: &'a PlayerState) -> Self {
        Player { position, state }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.state.side()
    }

    #[inline]
    pub fn king(&self) -> Piece {
        self.state.king()
    }

    pub fn active_pieces(&self) -> &'a [Piece] {
        self.position.active_pieces(self.side())
    }

    /// Pseudo-legal moves plus any available castles.
    ///
    /// Moves that would leave the king attacked are still listed; playing
    /// one through [`Player::make_move`] reports
    /// [`MoveStatus::LeavesPlayerInCheck`].
    pub fn legal_moves(&self) -> &'a [Move] {
        self.state.legal_moves()
    }

    pub fn opponent(&self) -> Player<'a> {
        self.position.player(self.side().opposite())
    }

    pub fn is_move_legal(&self, mv: &Move) -> bool {
        self.state.legal_moves().contains(mv)
    }

    pub fn is_in_check(&self) -> bool {
        self.state.is_in_check()
    }

    /// True if this side is to move, in check, and every move leaves it in
    /// check.
    ///
    /// Each call plays out all legal moves, so callers in a search loop
    /// should cache the answer.
    pub fn is_in_checkmate(&self) -> bool {
        self.is_to_move() && self.is_in_check() && !self.has_escape_moves()
    }

    /// True if this side is to move, not in check, and has no move that
    /// keeps its king safe. Costs the same as [`Player::is_in_checkmate`].
    pub fn is_in_stalemate(&self) -> bool {
        self.is_to_move() && !self.is_in_check() && !self.has_escape_moves()
    }

    pub fn is_king_side_castle_capable(&self) -> bool {
        self.king().is_king_side_castle_capable()
    }

    pub fn is_queen_side_castle_capable(&self) -> bool {
        self.king().is_queen_side_castle_capable()
    }

    pub fn is_castled(&self) -> bool {
        self.king().is_castled()
    }

    /// Plays `mv` if it is legal for this side.
    ///
    /// The move is matched against the legal move list, so callers can pass
    /// a move built elsewhere (for example by
    /// [`MoveFactory`](crate::MoveFactory)). A promotion kind carried by
    /// `mv` is honoured.
    ///
    /// Rule violations come back as a [`MoveStatus`] with the original
    /// position; only a failure to build the new position is an error.
    pub fn make_move(&self, mv: &Move) -> Result<MoveTransition<'a>, BoardError> {
        let original = self.position;

        if !self.is_to_move() {
            tracing::debug!(side = %self.side(), mv = %mv, "rejecting move out of turn");
            return Ok(MoveTransition::rejected(original, *mv, MoveStatus::IllegalMove));
        }
        let Some(&stored) = self.state.legal_moves().iter().find(|m| *m == mv) else {
            tracing::debug!(side = %self.side(), mv = %mv, "rejecting move not in legal set");
            return Ok(MoveTransition::rejected(original, *mv, MoveStatus::IllegalMove));
        };
        let chosen = match mv.promotion_kind() {
            Some(kind) => stored.with_promotion(kind),
            None => stored,
        };

        let candidate = chosen.execute(original)?;
        let king_square = candidate.player(self.side()).king().square();
        let exposes_king = candidate
            .current_player()
            .legal_moves()
            .iter()
            .any(|m| m.destination() == king_square);
        if exposes_king {
            tracing::debug!(
                side = %self.side(),
                mv = %chosen,
                "rejecting move that leaves king attacked"
            );
            return Ok(MoveTransition::rejected(
                original,
                chosen,
                MoveStatus::LeavesPlayerInCheck,
            ));
        }

        Ok(MoveTransition {
            original,
            transitioned: Some(candidate),
            mv: chosen,
            status: MoveStatus::Done,
        })
    }

    fn is_to_move(&self) -> bool {
        self.position.side_to_move() == self.side()
    }

    fn has_escape_moves(&self) -> bool {
        self.legal_moves().iter().any(|m| match self.make_move(m) {
            Ok(transition) => transition.status().is_done(),
            Err(err) => {
                tracing::debug!(
                    side = %self.side(),
                    mv = %m,
                    %err,
                    "trial move failed to build"
                );
                false
            }
        })
    }
}

/// Outcome of [`Player::make_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    Done,
    IllegalMove,
    LeavesPlayerInCheck,
}

impl MoveStatus {
    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self, MoveStatus::Done)
    }
}

/// The result of attempting a move: the position to continue from, the
/// move and its status.
#[derive(Debug, Clone)]
pub struct MoveTransition<'a> {
    original: &'a Position,
    transitioned: Option<Position>,
    mv: Move,
    status: MoveStatus,
}

impl<'a> MoveTransition<'a> {
    fn rejected(original: &'a Position, mv: Move, status: MoveStatus) -> Self {
        MoveTransition {
            original,
            transitioned: None,
            mv,
            status,
        }
    }

    /// The new position if the move was played, otherwise the original.
    pub fn position(&self) -> &Position {
        self.transitioned.as_ref().unwrap_or(self.original)
    }

    /// Like [`MoveTransition::position`], but takes ownership.
    pub fn into_position(self) -> Position {
        self.transitioned.unwrap_or_else(|| self.original.clone())
    }

    pub fn mv(&self) -> &Move {
        &self.mv
    }

    pub fn status(&self) -> MoveStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Builder, MoveFactory};
    use chess_core::PieceKind;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn play(position: &Position, from: &str, to: &str) -> Position {
        let mv = MoveFactory::create_move(position, sq(from), sq(to));
        let transition = position.current_player().make_move(&mv).unwrap();
        assert_eq!(transition.status(), MoveStatus::Done, "{from}{to}");
        transition.into_position()
    }

    #[test]
    fn rook_on_open_file_gives_check() {
        let mut builder = Builder::new();
        builder
            .set_piece(Piece::king(Side::White, Square::E1, false, false))
            .set_piece(Piece::king(Side::Black, sq("e8"), false, false))
            .set_piece(Piece::new(PieceKind::Rook, Side::Black, sq("e4")));
        let position = builder.build().unwrap();
        assert!(position.white_player().is_in_check());
        assert!(!position.black_player().is_in_check());
        assert!(!position.white_player().is_in_checkmate());
    }

    #[test]
    fn pawn_push_does_not_give_check() {
        let mut builder = Builder::new();
        builder
            .set_piece(Piece::king(Side::White, sq("e3"), false, false))
            .set_piece(Piece::king(Side::Black, Square::H8, false, false))
            .set_piece(Piece::new(PieceKind::Pawn, Side::Black, sq("e4")).with_first_move(false));
        let position = builder.build().unwrap();
        assert!(!position.white_player().is_in_check());
    }

    #[test]
    fn out_of_turn_move_is_illegal() {
        let position = Position::standard();
        let black = position.black_player();
        let mv = black.legal_moves()[0];
        let transition = black.make_move(&mv).unwrap();
        assert_eq!(transition.status(), MoveStatus::IllegalMove);
        assert_eq!(transition.position(), &position);
    }

    #[test]
    fn unknown_move_is_illegal() {
        let position = Position::standard();
        let transition = position.current_player().make_move(&Move::NULL).unwrap();
        assert_eq!(transition.status(), MoveStatus::IllegalMove);
        assert!(!transition.status().is_done());
        assert_eq!(transition.into_position(), position);
    }

    #[test]
    fn pinned_piece_cannot_expose_king() {
        let mut builder = Builder::new();
        builder
            .set_piece(Piece::king(Side::White, Square::E1, false, false))
            .set_piece(Piece::new(PieceKind::Bishop, Side::White, sq("e2")))
            .set_piece(Piece::new(PieceKind::Rook, Side::Black, sq("e7")))
            .set_piece(Piece::king(Side::Black, Square::A8, false, false));
        let position = builder.build().unwrap();

        let mv = MoveFactory::create_move(&position, sq("e2"), sq("d3"));
        assert!(position.white_player().is_move_legal(&mv));
        let transition = position.white_player().make_move(&mv).unwrap();
        assert_eq!(transition.status(), MoveStatus::LeavesPlayerInCheck);
        assert_eq!(transition.position(), &position);
    }

    #[test]
    fn done_move_flips_side() {
        let position = Position::standard();
        let next = play(&position, "e2", "e4");
        assert_eq!(next.side_to_move(), Side::Black);
        assert_eq!(next.en_passant_pawn().map(|p| p.square()), Some(sq("e4")));
        assert!(!position.board().is_occupied(sq("e4")));
    }

    #[test]
    fn under_promotion_is_honoured() {
        let mut builder = Builder::new();
        builder
            .set_piece(Piece::king(Side::White, Square::A1, false, false))
            .set_piece(Piece::king(Side::Black, Square::H8, false, false))
            .set_piece(Piece::new(PieceKind::Pawn, Side::White, sq("d7")).with_first_move(false));
        let position = builder.build().unwrap();

        let mv = MoveFactory::create_move(&position, sq("d7"), sq("d8"))
            .with_promotion(PieceKind::Knight);
        let transition = position.current_player().make_move(&mv).unwrap();
        assert!(transition.status().is_done());
        assert_eq!(transition.mv().promotion_kind(), Some(PieceKind::Knight));
        let promoted = transition.position().board().piece_at(Square::D8).unwrap();
        assert_eq!(promoted.kind(), PieceKind::Knight);
        assert_eq!(promoted.side(), Side::White);
    }

    #[test]
    fn checkmate_only_for_side_to_move() {
        let mut position = Position::standard();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            position = play(&position, from, to);
        }
        assert!(position.white_player().is_in_checkmate());
        assert!(!position.black_player().is_in_checkmate());
        assert!(!position.white_player().is_in_stalemate());
    }

    #[test]
    fn capturing_the_king_is_an_error_not_an_escape() {
        // Black is left in check with White to move, so Rxe8 takes the king.
        let position = Position::from_fen("4k3/8/8/8/4R3/8/8/K7 w - - 0 1").unwrap();
        let white = position.current_player();
        let take_king = MoveFactory::create_move(&position, sq("e4"), Square::E8);
        assert_eq!(
            take_king.attacked_piece().map(|p| p.kind()),
            Some(PieceKind::King)
        );
        assert_eq!(
            white.make_move(&take_king).unwrap_err(),
            BoardError::MissingKing(Side::Black)
        );

        // The failing trial is skipped; the other moves still count.
        assert!(!white.is_in_stalemate());
        assert!(!white.is_in_checkmate());
    }

    #[test]
    fn opponent_view_points_back() {
        let position = Position::standard();
        let white = position.white_player();
        assert_eq!(white.opponent().side(), Side::Black);
        assert_eq!(white.opponent().opponent().side(), Side::White);
        assert_eq!(white.active_pieces().len(), 16);
    }
}
