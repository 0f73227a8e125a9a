pub mod quadlet;
