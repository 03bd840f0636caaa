// Stage 1: every operator, leaf and control node is its own boxed node and
// all evaluation goes through `Node::eval`. This is the reference the other
// stages are checked against.

use crate::lower::Rules;

pub(crate) struct Simplest;

impl Rules for Simplest {}
