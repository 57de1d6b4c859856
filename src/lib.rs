//! # Order Desk
//!
//! Order placement over three in-process stores: customers, a product catalog
//! and orders. Each store is a [`resource_actor::ResourceActor`]; the order
//! workflow in [`create_order`] talks to them only through the traits in
//! [`repository`].
//!
//! - **[model]**: records and payloads ([`model::Customer`], [`model::Product`], [`model::Order`])
//! - **[customer_actor]**, **[product_actor]**, **[order_actor]**: entity behavior and errors
//! - **[clients]**: typed wrappers that implement the repository traits
//! - **[create_order]**: the order workflow
//! - **[config]**: workflow and runtime settings
//! - **[lifecycle]**: wiring, shutdown and tracing setup

pub mod clients;
pub mod config;
pub mod create_order;
pub mod customer_actor;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod repository;
