pub(crate) mod xdg_root;
