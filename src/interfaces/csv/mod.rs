pub mod roster_reader;
