pub mod feynman;
