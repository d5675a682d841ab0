mod aggregate;
mod classify;
mod policy;
mod queues;
mod simulator;
mod support;
