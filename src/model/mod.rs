pub mod obj_loader;
