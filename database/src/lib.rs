pub mod consts {
    pub mod consts;
}
pub mod database;
pub mod model;
