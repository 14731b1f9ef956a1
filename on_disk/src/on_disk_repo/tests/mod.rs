mod init;
mod work_tree;
