pub mod d400_superstore;
