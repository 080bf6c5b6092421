mod write_good;
