//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que viajan por la API.

pub mod ticket;
