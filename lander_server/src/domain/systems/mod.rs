pub mod lander_movement;
