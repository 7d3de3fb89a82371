pub mod audit;
pub mod compare;
pub mod impute;
pub mod normalize;
pub mod run;
pub mod trip;
pub mod velocity;
pub mod weather;
pub mod zone;
