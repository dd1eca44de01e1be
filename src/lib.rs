#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use dobj_mapper as mapper;
pub use dobj_utils as utils;
